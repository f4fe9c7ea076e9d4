mod reader;
mod request;

pub use reader::ReaderFetcher;
pub use request::RequestFetcher;
