//! In-memory `ToolRunner` used by unit tests.

use std::cell::RefCell;
use std::io;

use serde_json::{Value, json};

use super::runner::{ToolOutput, ToolRunner};

type Responder = Box<dyn Fn(&str, &[String]) -> io::Result<ToolOutput>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    /// Value following `flag`, e.g. `value_of("-i")`.
    pub fn value_of(&self, flag: &str) -> Option<&str> {
        self.args
            .iter()
            .position(|arg| arg == flag)
            .and_then(|pos| self.args.get(pos + 1))
            .map(String::as_str)
    }

    pub fn is_concat(&self) -> bool {
        self.value_of("-f") == Some("concat")
    }
}

pub struct FakeRunner {
    calls: RefCell<Vec<Invocation>>,
    responder: Responder,
    missing: Vec<String>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            responder: Box::new(|_, _| FakeRunner::success("")),
            missing: Vec::new(),
        }
    }

    pub fn respond(
        mut self,
        responder: impl Fn(&str, &[String]) -> io::Result<ToolOutput> + 'static,
    ) -> Self {
        self.responder = Box::new(responder);
        self
    }

    /// Pretend `program` is not installed.
    pub fn without(mut self, program: &str) -> Self {
        self.missing.push(program.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.borrow().clone()
    }

    pub fn success(stdout: &str) -> io::Result<ToolOutput> {
        Ok(ToolOutput {
            code: Some(0),
            stdout: stdout.to_string(),
            stderr: String::new(),
        })
    }

    pub fn failure(stderr: &str) -> io::Result<ToolOutput> {
        Ok(ToolOutput {
            code: Some(1),
            stdout: String::new(),
            stderr: stderr.to_string(),
        })
    }
}

impl ToolRunner for FakeRunner {
    fn run(&self, program: &str, args: &[String]) -> io::Result<ToolOutput> {
        self.calls.borrow_mut().push(Invocation {
            program: program.to_string(),
            args: args.to_vec(),
        });
        (self.responder)(program, args)
    }

    fn is_available(&self, program: &str) -> bool {
        !self.missing.iter().any(|m| m == program)
    }
}

pub fn video_stream(index: u32, width: u32, height: u32, rate: &str) -> Value {
    json!({
        "index": index,
        "codec_type": "video",
        "codec_name": "h264",
        "width": width,
        "height": height,
        "r_frame_rate": rate,
        "disposition": { "default": 1 }
    })
}

pub fn audio_stream(index: u32, language: Option<&str>, channels: u32, default: bool) -> Value {
    let mut stream = json!({
        "index": index,
        "codec_type": "audio",
        "codec_name": "aac",
        "channels": channels,
        "disposition": { "default": if default { 1 } else { 0 } }
    });
    if let Some(language) = language {
        stream["tags"] = json!({ "language": language });
    }
    stream
}

pub fn probe_output(streams: Vec<Value>) -> String {
    json!({ "streams": streams }).to_string()
}
