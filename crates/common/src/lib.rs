pub mod errors;
pub mod structured_logging;

pub use errors::{
    error_from_response, extract_error_message, InsightError, InsightResult,
    CONNECTION_ERROR_MESSAGE,
};
pub use structured_logging::{
    init_structured_logging, ExecutionContext, JsonFormatter, OperationTimer, StructuredLogEntry,
};
