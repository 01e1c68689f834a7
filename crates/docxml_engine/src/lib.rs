//! Docxml engine: page fetching, extraction pipeline and XML output.
mod batch;
mod decode;
mod extract;
mod fetch;
mod html;
mod page;
mod persist;
mod pipeline;
mod types;
mod xml;

pub use batch::{
    fetch_all, BatchResult, BatchSettings, DEFAULT_MAX_CONCURRENT_FETCHES, DEFAULT_PAGE_TIMEOUT,
};
pub use decode::{decode_html, DecodeError, DecodedHtml};
pub use extract::{
    discover_class_links, ClassExtractor, ClassOutline, ConstructorExtractor, FunctionExtractor,
    MemberExtractor, MemberLink, MemberPage, StructureError,
};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use page::{fetch_page, FetchedPage};
pub use persist::{ensure_output_dir, write_atomic, PersistError};
pub use pipeline::{
    Pipeline, PipelineError, ScrapeSettings, DEFAULT_ASSEMBLY, DEFAULT_INDEX_URL,
    DEFAULT_NAMESPACE,
};
pub use types::{FailureKind, FetchError, FetchMetadata, FetchOutput};
pub use xml::{render_doc_tree, write_doc_tree, SerializeError};
