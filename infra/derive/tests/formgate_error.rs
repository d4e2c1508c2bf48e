use formgate_derive::formgate_error;
use std::borrow::Cow;

#[formgate_error]
pub enum SampleError {
    #[error("IO error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn failing_io() -> Result<(), std::io::Error> {
    Err(std::io::Error::other("disk gone"))
}

#[test]
fn formgate_error_ui() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/formgate_error_pass.rs");
    t.pass("tests/ui/formgate_error_no_source.rs");
}

#[test]
fn context_is_attached_to_source_errors() {
    let err = failing_io().context("reading hidden fields").unwrap_err();

    assert!(matches!(err, SampleError::Io { context: Some(_), .. }));
    assert_eq!(err.to_string(), "IO error (reading hidden fields): disk gone");
}

#[test]
fn context_overrides_on_own_results() {
    let result: Result<(), SampleError> = Err("boom".into());
    let err = result.context("closing form").unwrap_err();

    assert_eq!(err.to_string(), "Internal error (closing form): boom");
}

#[test]
fn question_mark_converts_sources() {
    fn run() -> Result<(), SampleError> {
        failing_io()?;
        Ok(())
    }

    let err = run().unwrap_err();
    assert_eq!(err.to_string(), "IO error: disk gone");
}
