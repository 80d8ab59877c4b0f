pub(crate) const ENV_PYTHON_INTERPRETER_URL: &str = "PYTHON_INTERPRETER_URL";
pub(crate) const ENV_XMOS_RETRIEVER_URL: &str = "XMOS_RETRIEVER_URL";
pub(crate) const ENV_REQUEST_TIMEOUT_SECS: &str = "TOOLBRIDGE_REQUEST_TIMEOUT_SECS";

pub(crate) enum RestHeaders {
    Accept,
    ApplicationJson,
}

impl RestHeaders {
    pub fn as_str(&self) -> &str {
        match self {
            RestHeaders::Accept => "Accept",
            RestHeaders::ApplicationJson => "application/json",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rest_headers_returns_expected_values() {
        assert_eq!(RestHeaders::Accept.as_str(), "Accept");
        assert_eq!(RestHeaders::ApplicationJson.as_str(), "application/json");
    }
}
