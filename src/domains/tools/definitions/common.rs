//! Common utilities shared across Tavus tools.
//!
//! Response shaping and request-body helpers used by every resource module.

use rmcp::model::{CallToolResult, Content};
use serde::Serialize;
use serde_json::Value;

use crate::domains::tools::ToolError;

/// Render an upstream JSON body as a pretty-printed text result.
pub fn json_result(body: &Value) -> Result<CallToolResult, ToolError> {
    let text = serde_json::to_string_pretty(body)?;
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

/// Create a success result carrying a fixed confirmation sentence.
pub fn confirmation_result(message: String) -> CallToolResult {
    CallToolResult::success(vec![Content::text(message)])
}

/// Serialize typed params into the JSON request body.
pub fn request_body<P: Serialize>(params: &P) -> Result<Value, ToolError> {
    Ok(serde_json::to_value(params)?)
}

/// Query parameters for the optional `verbose` flag.
pub fn verbose_query(verbose: Option<bool>) -> Vec<(&'static str, String)> {
    verbose
        .map(|v| vec![("verbose", v.to_string())])
        .unwrap_or_default()
}

/// Parameters for tools that take no input (collection listings).
#[derive(Debug, Clone, Default, serde::Deserialize, schemars::JsonSchema)]
pub struct NoParams {}


#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_result_is_pretty_printed() {
        let result = json_result(&json!({"video_id": "v_1", "status": "queued"})).unwrap();
        assert_eq!(result.is_error, Some(false));
        let text = testing::text_of(&result);
        assert_eq!(
            text,
            serde_json::to_string_pretty(&json!({"video_id": "v_1", "status": "queued"})).unwrap()
        );
        assert!(text.contains('\n'));
    }

    #[test]
    fn test_json_result_null_body() {
        let result = json_result(&Value::Null).unwrap();
        assert_eq!(testing::text_of(&result), "null");
    }

    #[test]
    fn test_verbose_query() {
        assert!(verbose_query(None).is_empty());
        assert_eq!(verbose_query(Some(true)), vec![("verbose", "true".to_string())]);
        assert_eq!(verbose_query(Some(false)), vec![("verbose", "false".to_string())]);
    }

    #[test]
    fn test_no_params_accepts_empty_object() {
        let params: Result<NoParams, _> = serde_json::from_value(json!({}));
        assert!(params.is_ok());
    }
}
