//! MCP server for the readability calculator.
//!
//! Tools take raw text rather than paths: the client already holds the
//! document, and the server never touches the filesystem. Every tool
//! answers with a single JSON text block.

use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::schemars;
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};
use serde::Serialize;

use readable_core::calculator::{Calculator, Metric};
use readable_core::{markdown, mimetype};

/// Parameters for the `calculate_scores` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct CalculateScoresParams {
    /// The text to score.
    pub text: String,
    /// Whether to strip markdown formatting before scoring.
    #[serde(default)]
    pub strip_markdown: bool,
    /// Return only this metric instead of the full score set.
    pub metric: Option<Metric>,
}

/// Parameters for the `reading_time` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct ReadingTimeParams {
    /// The text to measure.
    pub text: String,
    /// Reading speed in words per minute. Defaults to the server's configuration.
    pub words_per_minute: Option<i64>,
}

/// Parameters for the `check_mimetype` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct CheckMimetypeParams {
    /// Mimetype or `Content-Type` header value.
    pub mimetype: String,
}

#[derive(Serialize)]
struct ServerDescription {
    name: &'static str,
    version: &'static str,
    reading_speed: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_input_bytes: Option<usize>,
    metrics: Vec<&'static str>,
}

#[derive(Serialize)]
struct ReadingTimeReport {
    seconds: u64,
    formatted: String,
    words_per_minute: u32,
}

#[derive(Serialize)]
struct MimetypeReport<'a> {
    mimetype: &'a str,
    supported: bool,
}

fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))?;
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

/// Serves `describe`, `calculate_scores`, `reading_time` and `check_mimetype`.
#[derive(Clone)]
pub struct ReadableServer {
    tool_router: rmcp::handler::server::router::tool::ToolRouter<Self>,
    reading_speed: Option<i64>,
    max_input_bytes: Option<usize>,
}

impl Default for ReadableServer {
    fn default() -> Self {
        Self::new(None, Some(readable_core::DEFAULT_MAX_INPUT_BYTES))
    }
}

impl ReadableServer {
    /// Reject texts above the configured input limit.
    fn check_size(&self, text: &str) -> Result<(), McpError> {
        match self.max_input_bytes {
            Some(max) if text.len() > max => Err(McpError::invalid_params(
                format!("input too large: {} bytes (limit: {max} bytes)", text.len()),
                None,
            )),
            _ => Ok(()),
        }
    }
}

#[tool_router]
impl ReadableServer {
    /// Create a server using `reading_speed` (words per minute) unless a call
    /// overrides it, rejecting texts larger than `max_input_bytes`.
    pub fn new(reading_speed: Option<i64>, max_input_bytes: Option<usize>) -> Self {
        Self {
            tool_router: Self::tool_router(),
            reading_speed,
            max_input_bytes,
        }
    }

    /// Describe the server and the metrics it computes.
    #[tool(description = "Show the server version, its default reading speed, and the metric keys calculate_scores returns.")]
    #[tracing::instrument(skip(self), fields(otel.kind = "server"))]
    fn describe(&self) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "describe", "executing MCP tool");
        json_result(&ServerDescription {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            reading_speed: Calculator::new(self.reading_speed).reading_speed(),
            max_input_bytes: self.max_input_bytes,
            metrics: Metric::ALL.iter().map(|m| m.key()).collect(),
        })
    }

    /// Compute the readability score set.
    #[tool(
        description = "Compute readability scores for text: Flesch-Kincaid reading ease and grade level, Gunning Fog, Coleman-Liau, SMOG, ARI, Dale-Chall, Spache, word count, average sentence length and reading time in seconds."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn calculate_scores(
        &self,
        Parameters(params): Parameters<CalculateScoresParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(
            tool = "calculate_scores",
            strip_md = params.strip_markdown,
            metric = ?params.metric,
            "executing MCP tool"
        );
        self.check_size(&params.text)?;

        let text = if params.strip_markdown {
            markdown::to_plain_text(&params.text)
        } else {
            params.text
        };
        let scores = Calculator::new(self.reading_speed).calculate_scores(&text);

        tracing::info!(tool = "calculate_scores", words = scores.word_count, "MCP tool completed");
        match params.metric {
            Some(metric) => json_result(&serde_json::json!({
                "metric": metric,
                "value": scores.get(metric),
            })),
            None => json_result(&scores),
        }
    }

    /// Estimate reading time.
    #[tool(description = "Estimate how long text takes to read, in seconds and as H:MM:SS.")]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn reading_time(
        &self,
        Parameters(params): Parameters<ReadingTimeParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "reading_time", wpm = ?params.words_per_minute, "executing MCP tool");
        self.check_size(&params.text)?;

        let calculator = Calculator::new(params.words_per_minute.or(self.reading_speed));
        let seconds = calculator.calculate_reading_time(&params.text);
        let report = ReadingTimeReport {
            seconds,
            formatted: calculator.format_time(seconds),
            words_per_minute: calculator.reading_speed(),
        };

        tracing::info!(tool = "reading_time", seconds, "MCP tool completed");
        json_result(&report)
    }

    /// Check a mimetype against the allow-list.
    #[tool(
        description = "Check whether documents of a mimetype (or Content-Type header value) can be scored."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn check_mimetype(
        &self,
        Parameters(params): Parameters<CheckMimetypeParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "check_mimetype", mimetype = %params.mimetype, "executing MCP tool");

        let bare = mimetype::mimetype_without_parameters(&params.mimetype);
        let report = MimetypeReport {
            mimetype: bare,
            supported: mimetype::is_mimetype_supported(bare),
        };

        tracing::info!(tool = "check_mimetype", supported = report.supported, "MCP tool completed");
        json_result(&report)
    }
}

#[tool_handler]
impl ServerHandler for ReadableServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(
                "Readability metrics for plain or markdown text. calculate_scores returns \
                 the full score set (or one metric), reading_time estimates seconds to \
                 read, check_mimetype tells whether a document type can be scored, and \
                 describe lists the metric keys."
                    .to_string(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::RawContent;

    fn json(result: Result<CallToolResult, McpError>) -> serde_json::Value {
        let result = result.expect("tool call succeeds");
        assert!(!result.is_error.unwrap_or(false));
        let text = match &result.content.first().expect("one content block").raw {
            RawContent::Text(t) => t.text.clone(),
            other => panic!("expected text content, got {other:?}"),
        };
        serde_json::from_str(&text).expect("valid JSON")
    }

    fn scores(text: &str, strip_markdown: bool, metric: Option<Metric>) -> Parameters<CalculateScoresParams> {
        Parameters(CalculateScoresParams {
            text: text.to_string(),
            strip_markdown,
            metric,
        })
    }

    #[test]
    fn handler_info() {
        let info = ServerHandler::get_info(&ReadableServer::default());
        assert_eq!(info.server_info.name, env!("CARGO_PKG_NAME"));
        assert_eq!(info.server_info.version, env!("CARGO_PKG_VERSION"));
        assert!(info.capabilities.tools.is_some());
        assert!(info.instructions.unwrap().contains("calculate_scores"));
    }

    #[test]
    fn describe_lists_metric_keys() {
        let value = json(ReadableServer::new(Some(300), None).describe());
        assert_eq!(value["reading_speed"], 300);
        assert!(value.get("max_input_bytes").is_none());
        assert_eq!(value["metrics"].as_array().unwrap().len(), Metric::ALL.len());
        assert_eq!(value["metrics"][0], "fleschkincaidreadingease");
    }

    #[test]
    fn full_score_set() {
        let server = ReadableServer::default();
        let value = json(server.calculate_scores(scores(
            "The cat sat on the mat. The dog ran fast.",
            false,
            None,
        )));

        assert_eq!(value["wordcount"], 10);
        assert_eq!(value["averagewordspersentence"], 5.0);
        assert!(value["fleschkincaidgradelevel"].is_f64());
        assert_eq!(value.as_object().unwrap().len(), Metric::ALL.len());
    }

    #[test]
    fn one_metric_from_markdown() {
        let server = ReadableServer::default();
        let text = "# Title\n\nThe cat sat on the mat.\n\n```\nlet x = 1;\n```";
        let value = json(server.calculate_scores(scores(text, true, Some(Metric::WordCount))));

        assert_eq!(value["metric"], "wordcount");
        assert_eq!(value["value"], 7);
    }

    #[test]
    fn oversized_text_is_invalid_params() {
        let server = ReadableServer::new(None, Some(8));
        let err = server
            .calculate_scores(scores("This text is longer than eight bytes.", false, None))
            .unwrap_err();
        assert!(err.message.contains("input too large"));
    }

    #[test]
    fn reading_time_speed_resolution() {
        let server = ReadableServer::new(Some(400), None);
        let call = |words_per_minute| {
            json(server.reading_time(Parameters(ReadingTimeParams {
                text: "word ".repeat(5000),
                words_per_minute,
            })))
        };

        let configured = call(None);
        assert_eq!(configured["seconds"], 750);
        assert_eq!(configured["formatted"], "0:12:30");

        let fallback = call(Some(0));
        assert_eq!(fallback["words_per_minute"], 238);
        assert_eq!(fallback["seconds"], 1260);

        assert_eq!(call(Some(500))["seconds"], 600);
    }

    #[test]
    fn mimetype_parameters_are_ignored() {
        let server = ReadableServer::default();
        let check = |mimetype: &str| {
            json(server.check_mimetype(Parameters(CheckMimetypeParams {
                mimetype: mimetype.to_string(),
            })))
        };

        let plain = check("text/plain; charset=ISO-8859-1");
        assert_eq!(plain["mimetype"], "text/plain");
        assert_eq!(plain["supported"], true);
        assert_eq!(check("application/octet-stream")["supported"], false);
    }
}
