/// A raw message fixture benchmarked by one of the codecs.
#[derive(Debug, Copy, Clone)]
pub struct TestCase {
    name: &'static str,
    kind: MessageKind,
    file: TestFile,
}

impl TestCase {
    pub fn new(name: &'static str, kind: MessageKind, file: TestFile) -> Self {
        Self { name, kind, file }
    }

    pub fn request(name: &'static str, file: TestFile) -> Self {
        Self::new(name, MessageKind::Request, file)
    }

    pub fn response(name: &'static str, file: TestFile) -> Self {
        Self::new(name, MessageKind::Response, file)
    }

    pub fn query(name: &'static str, file: TestFile) -> Self {
        Self::new(name, MessageKind::Query, file)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> MessageKind {
        self.kind
    }

    pub fn file(&self) -> &TestFile {
        &self.file
    }

    pub fn file_name(&self) -> &'static str {
        self.file().file_name
    }
}

#[derive(Debug, Copy, Clone)]
pub struct TestFile {
    file_name: &'static str,
    content: &'static str,
}

impl TestFile {
    pub const fn new(file_name: &'static str, content: &'static str) -> Self {
        Self { file_name, content }
    }

    pub fn content(&self) -> &'static str {
        self.content
    }

    pub fn file_name(&self) -> &'static str {
        self.file_name
    }
}

/// Which codec reads a fixture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    Request,
    /// A raw response with `\n` line breaks.
    Response,
    Query,
}
