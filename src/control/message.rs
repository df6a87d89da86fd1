//! Strongly-typed inbound/outbound control messages.
//!
//! [`InboundMessage::decode`] and [`OutboundMessage::encode`] are the only
//! places the loosely-typed [`super::envelope::Envelope::data`] map is
//! actually touched; everywhere else in the engine works with these enums.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::envelope::Envelope;
use super::error::ControlError;

#[derive(Debug, Clone, Deserialize)]
pub struct InitData {
    #[serde(default)]
    pub workers: Option<usize>,
    #[serde(default)]
    pub timeout: Option<u64>,
    #[serde(default)]
    pub base_delay: Option<u64>,
    #[serde(default)]
    pub min_delay: Option<u64>,
    #[serde(default)]
    pub max_delay: Option<u64>,
    #[serde(default)]
    pub max_retries: Option<u8>,
    #[serde(default)]
    pub results_per_page: Option<u32>,
    #[serde(default)]
    pub proxy_file: Option<String>,
    #[serde(default)]
    pub proxies: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TaskData {
    pub id: String,
    pub dork: String,
    #[serde(default)]
    pub page: u32,
}

#[derive(Debug, Clone)]
pub enum InboundMessage {
    Init(InitData),
    Task(TaskData),
    TaskBatch(Vec<TaskData>),
    Pause,
    Resume,
    GetStats,
    Shutdown,
}

impl InboundMessage {
    /// Decode one line of the wire protocol. Malformed JSON or an
    /// unrecognized `type` both yield a typed [`ControlError`]; neither
    /// should terminate the engine — the caller is expected to
    /// emit the corresponding `error` outbound message and keep reading.
    pub fn decode(line: &str) -> Result<Self, ControlError> {
        let envelope: Envelope =
            serde_json::from_str(line).map_err(|e| ControlError::ParseError(e.to_string()))?;
        Self::from_envelope(envelope)
    }

    pub fn from_envelope(envelope: Envelope) -> Result<Self, ControlError> {
        let data = envelope.data.unwrap_or(Value::Null);
        match envelope.msg_type.as_str() {
            "init" => {
                let init: InitData = serde_json::from_value(data)
                    .map_err(|e| ControlError::ParseError(e.to_string()))?;
                Ok(InboundMessage::Init(init))
            }
            "task" => {
                let task: TaskData = serde_json::from_value(data)
                    .map_err(|e| ControlError::ParseError(e.to_string()))?;
                Ok(InboundMessage::Task(task))
            }
            "task_batch" => {
                let tasks: Vec<TaskData> = serde_json::from_value(data)
                    .map_err(|e| ControlError::ParseError(e.to_string()))?;
                Ok(InboundMessage::TaskBatch(tasks))
            }
            "pause" => Ok(InboundMessage::Pause),
            "resume" => Ok(InboundMessage::Resume),
            "get_stats" => Ok(InboundMessage::GetStats),
            "shutdown" => Ok(InboundMessage::Shutdown),
            other => Err(ControlError::UnknownType(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    Ready,
    Initialized,
    Paused,
    Resumed,
    Shutdown,
    Interrupted,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResultData {
    pub task_id: String,
    pub dork: String,
    pub status: String,
    pub urls: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy_id: Option<String>,
    pub duration_ms: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatsData {
    pub tasks_total: u64,
    pub tasks_completed: u64,
    pub tasks_failed: u64,
    pub urls_found: u64,
    pub captcha_count: u64,
    pub block_count: u64,
    pub elapsed_ms: u64,
    pub requests_per_sec: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProgressData {
    pub current: u64,
    pub total: u64,
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProxyInfoData {
    pub alive: u64,
    pub dead: u64,
    pub quarantined: u64,
    pub total: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct LogData {
    pub level: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorData {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Clone)]
pub enum OutboundMessage {
    Status(StatusKind),
    Result(ResultData),
    Stats(StatsData),
    Progress(ProgressData),
    ProxyInfo(ProxyInfoData),
    Log(LogData),
    Error(ErrorData),
}

impl OutboundMessage {
    #[must_use]
    pub fn type_str(&self) -> &'static str {
        match self {
            OutboundMessage::Status(_) => "status",
            OutboundMessage::Result(_) => "result",
            OutboundMessage::Stats(_) => "stats",
            OutboundMessage::Progress(_) => "progress",
            OutboundMessage::ProxyInfo(_) => "proxy_info",
            OutboundMessage::Log(_) => "log",
            OutboundMessage::Error(_) => "error",
        }
    }

    /// Encode as one wire line (no trailing newline — callers append
    /// their own line terminator when writing to the outbound stream).
    pub fn encode(&self, ts_ms: i64) -> serde_json::Result<String> {
        let data = match self {
            OutboundMessage::Status(kind) => serde_json::to_value(kind)?,
            OutboundMessage::Result(d) => serde_json::to_value(d)?,
            OutboundMessage::Stats(d) => serde_json::to_value(d)?,
            OutboundMessage::Progress(d) => serde_json::to_value(d)?,
            OutboundMessage::ProxyInfo(d) => serde_json::to_value(d)?,
            OutboundMessage::Log(d) => serde_json::to_value(d)?,
            OutboundMessage::Error(d) => serde_json::to_value(d)?,
        };
        let envelope = Envelope::new(self.type_str(), ts_ms, Some(data));
        serde_json::to_string(&envelope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_init() {
        let line = r#"{"type":"init","ts":0,"data":{"workers":5,"proxies":["a:1"]}}"#;
        match InboundMessage::decode(line).unwrap() {
            InboundMessage::Init(init) => {
                assert_eq!(init.workers, Some(5));
                assert_eq!(init.proxies, vec!["a:1".to_string()]);
            }
            _ => panic!("expected Init"),
        }
    }

    #[test]
    fn decodes_task_batch() {
        let line = r#"{"type":"task_batch","ts":0,"data":[{"id":"1","dork":"site:x","page":0}]}"#;
        match InboundMessage::decode(line).unwrap() {
            InboundMessage::TaskBatch(tasks) => assert_eq!(tasks.len(), 1),
            _ => panic!("expected TaskBatch"),
        }
    }

    #[test]
    fn unknown_type_is_typed_error() {
        let line = r#"{"type":"frobnicate","ts":0}"#;
        let err = InboundMessage::decode(line).unwrap_err();
        assert_eq!(err.code(), "unknown_type");
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let err = InboundMessage::decode("not json").unwrap_err();
        assert_eq!(err.code(), "parse_error");
    }

    #[test]
    fn pause_resume_get_stats_shutdown_decode() {
        for (line, expect_variant) in [
            (r#"{"type":"pause","ts":0}"#, "pause"),
            (r#"{"type":"resume","ts":0}"#, "resume"),
            (r#"{"type":"get_stats","ts":0}"#, "get_stats"),
            (r#"{"type":"shutdown","ts":0}"#, "shutdown"),
        ] {
            let msg = InboundMessage::decode(line).unwrap();
            let ok = matches!(
                (expect_variant, &msg),
                ("pause", InboundMessage::Pause)
                    | ("resume", InboundMessage::Resume)
                    | ("get_stats", InboundMessage::GetStats)
                    | ("shutdown", InboundMessage::Shutdown)
            );
            assert!(ok);
        }
    }

    #[test]
    fn outbound_result_encodes_with_type_field() {
        let msg = OutboundMessage::Result(ResultData {
            task_id: "abc".into(),
            dork: "site:x".into(),
            status: "success".into(),
            urls: vec!["https://example.com".into()],
            error: None,
            proxy_id: Some("http_1.2.3.4_8080".into()),
            duration_ms: 120,
        });
        let line = msg.encode(0).unwrap();
        assert!(line.contains("\"type\":\"result\""));
        assert!(line.contains("example.com"));
    }
}
