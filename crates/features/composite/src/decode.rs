use formgate_domain::constants::{
    COMPOSITE_CANDIDATE_PREFIX, COMPOSITE_KEYS_PREFIX, COMPOSITE_SEPARATOR, COMPOSITE_VARS,
    composite_candidate_field, composite_keys_field,
};
use formgate_domain::request::RequestParams;
use fxhash::FxHashSet;
use tracing::{debug, instrument, trace};

/// Splits every submitted composite value that matches a rendered candidate into one
/// parameter per key name, then removes the composite bookkeeping fields.
///
/// Anomalies are never errors: a missing or repeated registry drops everything, a missing or
/// repeated key-names field drops that variable, candidates of the wrong arity are ignored and
/// submitted values matching no candidate byte for byte are rejected. Returns the number of
/// accepted values.
#[instrument(skip_all)]
pub fn decode(params: &mut RequestParams) -> usize {
    let synthesized = synthesize(params);
    let accepted = synthesized.len();

    for (keys, values) in synthesized {
        for (key, value) in keys.into_iter().zip(values) {
            params.append(key, value);
        }
    }

    params.remove(COMPOSITE_VARS);
    params.remove_prefixed(COMPOSITE_KEYS_PREFIX);
    params.remove_prefixed(COMPOSITE_CANDIDATE_PREFIX);

    accepted
}

type Split = (Vec<String>, Vec<String>);

fn synthesize(params: &RequestParams) -> Vec<Split> {
    let Some([registry]) = params.get(COMPOSITE_VARS) else {
        if params.contains(COMPOSITE_VARS) {
            debug!("Composite registry repeated, nothing decoded");
        }
        return Vec::new();
    };

    let mut out = Vec::new();
    for var in registry.split(COMPOSITE_SEPARATOR).filter(|v| !v.is_empty()) {
        let Some([keys]) = params.get(&composite_keys_field(var)) else {
            debug!(var, "Composite key names missing or repeated, variable skipped");
            continue;
        };
        let keys: Vec<&str> = keys.split(COMPOSITE_SEPARATOR).collect();
        if keys.iter().any(|k| k.is_empty()) {
            debug!(var, "Composite key names malformed, variable skipped");
            continue;
        }

        let candidates: FxHashSet<&str> = params
            .get(&composite_candidate_field(var))
            .unwrap_or_default()
            .iter()
            .map(String::as_str)
            .filter(|c| {
                let fits = c.split(COMPOSITE_SEPARATOR).count() == keys.len();
                if !fits {
                    debug!(var, candidate = %c, "Candidate arity mismatch, discarded");
                }
                fits
            })
            .collect();

        for value in params.get(var).unwrap_or_default() {
            if candidates.contains(value.as_str()) {
                trace!(var, "Composite value accepted");
                out.push((
                    keys.iter().map(|k| (*k).to_owned()).collect(),
                    value.split(COMPOSITE_SEPARATOR).map(str::to_owned).collect(),
                ));
            } else {
                debug!(var, value = %value, "Composite value is not a rendered candidate, rejected");
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(pairs: &[(&str, &str)]) -> RequestParams {
        pairs.iter().copied().collect()
    }

    fn values<'a>(params: &'a RequestParams, name: &str) -> Vec<&'a str> {
        params.get(name).unwrap_or_default().iter().map(String::as_str).collect()
    }

    const RENDERED: [(&str, &str); 4] = [
        ("nablarch_cbx_composite_vars", "sel"),
        ("nablarch_cbx_composite_keys_sel", "key1,key2"),
        ("nablarch_cbx_composite_candidate_sel", "v11,v21"),
        ("nablarch_cbx_composite_candidate_sel", "v12,v22"),
    ];

    #[test]
    fn echoed_candidates_are_split_positionally() {
        let mut params = request(&RENDERED);
        params.append("sel", "v11,v21");
        params.append("sel", "v12,v22");

        assert_eq!(decode(&mut params), 2);
        assert_eq!(values(&params, "key1"), ["v11", "v12"]);
        assert_eq!(values(&params, "key2"), ["v21", "v22"]);
        assert!(!params.names().any(|n| n.starts_with("nablarch_cbx_")));
    }

    #[test]
    fn recombined_tuple_is_rejected() {
        let mut params = request(&RENDERED);
        params.append("sel", "v11,v22");

        assert_eq!(decode(&mut params), 0);
        assert!(!params.contains("key1"));
        assert!(!params.contains("key2"));
    }

    #[test]
    fn arity_mismatched_candidate_never_matches() {
        let mut params = request(&RENDERED[..3]);
        params.append("nablarch_cbx_composite_candidate_sel", "a,b,c");
        params.append("sel", "a,b,c");

        assert_eq!(decode(&mut params), 0);
    }

    #[test]
    fn missing_or_repeated_registry_decodes_nothing() {
        let mut params = request(&RENDERED[1..]);
        params.append("sel", "v11,v21");
        assert_eq!(decode(&mut params), 0);

        let mut params = request(&RENDERED);
        params.append("nablarch_cbx_composite_vars", "sel");
        params.append("sel", "v11,v21");
        assert_eq!(decode(&mut params), 0);
        assert!(!params.contains("nablarch_cbx_composite_vars"));
    }

    #[test]
    fn repeated_key_names_skip_only_that_variable() {
        let mut params = request(&[
            ("nablarch_cbx_composite_vars", "a,b"),
            ("nablarch_cbx_composite_keys_a", "x"),
            ("nablarch_cbx_composite_keys_a", "x"),
            ("nablarch_cbx_composite_candidate_a", "1"),
            ("nablarch_cbx_composite_keys_b", "y"),
            ("nablarch_cbx_composite_candidate_b", "2"),
            ("a", "1"),
            ("b", "2"),
        ]);

        assert_eq!(decode(&mut params), 1);
        assert!(!params.contains("x"));
        assert_eq!(values(&params, "y"), ["2"]);
    }
}
