//! Search module tests.

mod command_test;
mod support;

/// Verify all public search types are exported from the library.
#[test]
fn test_all_search_types_exported() {
    use loggrep::search::{
        chunk_channel, escape_html, render_line, sanitize_query, ChildProcess, Chunk, ChunkSink,
        ChunkStream, CommandSpec, GrepSpawner, LineBuffer, ProcessSpawner, SearchError,
        SearchOutcome, SearchParams, SearchRunner, SearchTask, SearchTool, SinkError, SpawnError,
        DEFAULT_CHUNK_CAPACITY, LINE_BREAK, READ_BUFFER_SIZE,
    };

    let _ = LineBuffer::new();
    let _ = GrepSpawner;
    let _ = SearchOutcome::default();
    let _ = SearchParams::default();
    let _ = SearchTool::for_file("x.log");
    let _ = (sanitize_query("x"), escape_html("x"), LINE_BREAK);
    let _ = (DEFAULT_CHUNK_CAPACITY, READ_BUFFER_SIZE);
    let _: fn(usize) -> (_, ChunkStream) = chunk_channel;
    let _: fn() -> SinkError = || SinkError::Closed;
    let _: fn() -> SearchError = || SearchError::NoStdout;
    let _: fn() -> SpawnError = || SpawnError::NotFound("grep".to_string());
    let _: Option<&dyn ChildProcess> = None;
    let _: Option<&dyn ProcessSpawner> = None;
    let _: Option<Box<dyn ChunkSink>> = None;
    let _: fn(&loggrep::parser::ParseContext) -> String = render_line;
    let _: Option<(Chunk, CommandSpec, SearchRunner, SearchTask)> = None;
}
