use crate::error::{Error, Result};

/// Ensures that a value bound for a single-valued request parameter is unset or has one element.
pub fn check_null_or_scalar<T>(value: Option<&[T]>, argument: &'static str) -> Result<()> {
    match value {
        Some(values) if values.len() > 1 => Err(Error::ScalarArgumentExpected {
            argument,
            length: values.len(),
        }),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_unset_and_scalar() {
        assert!(check_null_or_scalar::<&str>(None, "where").is_ok());
        assert!(check_null_or_scalar(Some(&["1=1"][..]), "where").is_ok());
        assert!(check_null_or_scalar::<&str>(Some(&[]), "where").is_ok());
    }

    #[test]
    fn rejects_multiple_values() {
        let error = check_null_or_scalar(Some(&["a = 1", "b = 2"][..]), "where").unwrap_err();

        assert!(matches!(
            error,
            Error::ScalarArgumentExpected {
                argument: "where",
                length: 2
            }
        ));
        assert_eq!(
            error.to_string(),
            "`where` must be a scalar or unset, but 2 values were given"
        );
    }
}
