//! Tail module tests against real files.

mod lines_test;
mod orchestrator_test;

/// Verify the public tail types are exported from the library.
#[test]
fn test_all_tail_types_exported() {
    use mytail::source::{ByteSource, FsOpener, MemoryOpener, SourceOpener};
    use mytail::tail::{ReadRequest, ReadResult, ReadStatus, TailError, TargetFile};

    let _ = FsOpener::new();
    let _ = MemoryOpener::new();
    let _ = ReadRequest::default();
    let _ = ReadResult::success(Vec::new());
    let _: fn() -> TailError = || TailError::WindowTooLarge(0);
    let _ = ReadStatus::Success;
    let _: fn(&MemoryOpener) -> Result<TargetFile, TailError> = |o| TargetFile::resolve(o, "x");

    fn assert_source<S: ByteSource>() {}
    assert_source::<<FsOpener as SourceOpener>::Source>();
    assert_source::<<MemoryOpener as SourceOpener>::Source>();
}
