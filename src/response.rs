use serde::Deserialize;

/// Outcome of every API call: either a mapped payload or a structured error.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestResponse<T, E> {
    Success(T),
    Error(E),
}

impl<T, E> RequestResponse<T, E> {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Success(data) => Some(data),
            Self::Error(_) => None,
        }
    }

    pub fn error(&self) -> Option<&E> {
        match self {
            Self::Success(_) => None,
            Self::Error(err) => Some(err),
        }
    }

    pub fn into_data(self) -> Option<T> {
        match self {
            Self::Success(data) => Some(data),
            Self::Error(_) => None,
        }
    }

    pub fn into_error(self) -> Option<E> {
        match self {
            Self::Success(_) => None,
            Self::Error(err) => Some(err),
        }
    }
}

/// Structured error carried by the error side of [`RequestResponse`].
///
/// `data` holds the server's structured error body when one was returned,
/// `data_to_info` renders it for logs.
#[derive(Debug, Clone)]
pub struct ErrorData<D = BlockchainApiError> {
    pub name: String,
    pub message: String,
    pub status: Option<u16>,
    pub data: Option<D>,
    data_to_info: Option<fn(&D) -> String>,
}

impl<D> ErrorData<D> {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
            status: None,
            data: None,
            data_to_info: None,
        }
    }

    pub fn with_response(
        name: impl Into<String>,
        message: impl Into<String>,
        status: u16,
        data: Option<D>,
        data_to_info: Option<fn(&D) -> String>,
    ) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
            status: Some(status),
            data,
            data_to_info,
        }
    }
}

impl<D: std::fmt::Debug> ErrorData<D> {
    /// Multi-line rendering used for error logs.
    pub fn info(&self) -> String {
        let mut out = format!("Name: {}\nMessage: {}", self.name, self.message);
        if let Some(status) = self.status {
            out.push_str(&format!("\nStatus: {status}"));
        }
        if let Some(data) = &self.data {
            match self.data_to_info {
                Some(render) => out.push_str(&format!("\nData:\n{}", render(data))),
                None => out.push_str(&format!("\nData: {data:?}")),
            }
        }
        out
    }
}

impl<D> std::fmt::Display for ErrorData<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.name, self.message)
    }
}

/// Error body returned by the chain's REST gateway.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BlockchainApiError {
    pub code: i64,
    pub message: String,
    #[serde(default)]
    pub details: Vec<serde_json::Value>,
}

/// Renders a [`BlockchainApiError`] for [`ErrorData::info`].
pub fn blockchain_error_info(data: &BlockchainApiError) -> String {
    format!("\tCode: {}\n\tMessage: {}", data.code, data.message)
}
