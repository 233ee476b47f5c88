mod json;

pub use json::JsonEventSink;
