use crate::error::FormError;
use formgate_domain::config::FormConfig;
use formgate_domain::request::RequestParams;
use formgate_vault::HiddenCodec;
use tracing::{debug, instrument};

/// Restores a submitted request before any handler sees it.
///
/// Hidden fields are unpacked or unsealed, the parameters of the submission that fired are
/// expanded, then composite-key values are validated and split. Only the returned parameters
/// may be handed to handlers.
///
/// # Errors
/// [`FormError::Hidden`] if `nablarch_hidden` is forged, repeated, or cannot be unsealed.
#[instrument(skip(params, config, codec))]
pub fn decode_request(
    mut params: RequestParams,
    current_request_id: &str,
    config: &FormConfig,
    codec: &dyn HiddenCodec,
) -> Result<RequestParams, FormError> {
    formgate_hidden::unpack_request(&mut params, current_request_id, config, codec)?;
    let accepted = formgate_composite::decode(&mut params);

    debug!(params = params.len(), composite_values = accepted, "Request decoded");
    Ok(params)
}
