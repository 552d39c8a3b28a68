//! Markdown ↔ storage-format transcoding and minimal-diff table editing
//!
//!     The storage format is the XHTML dialect wiki pages are persisted in: headings, emphasis,
//!     lists, tables, links and images, plus vendor macros (`ac:structured-macro`) for code and
//!     diagram blocks. This crate converts it to and from Markdown, and edits it in place.
//!
//!     This is a pure lib: it powers confmark-cli but is shell agnostic. No code here prints,
//!     reads environment variables or touches the network. Every operation is `text → text`.
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and conversion
//!     ├── formats
//!     │   ├── markdown
//!     │   │   ├── parser.rs       # Markdown → storage compiler
//!     │   │   ├── serializer.rs   # storage → Markdown decompiler
//!     │   │   └── mod.rs
//!     │   └── storage             # identity format, the conversion hub
//!     ├── common                  # inline spans, macros, images, markup helpers
//!     ├── table                   # locator, structural editor, cell content, summaries
//!     ├── patch.rs                # exact-substring patch, content insertion
//!     ├── op.rs                   # edit requests as data
//!     └── store.rs                # document store boundary, PageEditor
//!
//! Testing
//!     tests
//!     ├── <area>
//!     │   └── <testname>.rs
//!     └── fixtures
//!
//!     Rust does not discover tests in subdirectories by default, so tests/lib.rs includes them.
//!
//! Core Algorithms
//!
//!     Conversion does not build a tree. Markdown is compiled by a line classifier feeding a small
//!     state machine (none / code block / table / list). Storage markup is decompiled by an ordered
//!     list of whole-document rewrites, ending with tag stripping and entity decoding; it is lossy.
//!
//!     Table edits must leave every byte outside the target untouched, because the document is
//!     owned upstream and may hold markup we do not understand. The locator therefore reports
//!     tables, rows and cells as byte ranges, and the editor splices replacement text into those
//!     ranges only.
//!
//!     Rows with merged cells are the hard case. A banner row (first cell has `colspan`, at most
//!     two cells) has its span adjusted on column edits. Any other edit that would have to reason
//!     about spans is refused with [`EditError::UnsupportedStructure`], pointing the caller at
//!     [`patch::patch`].

pub mod common;
pub mod error;
pub mod format;
pub mod formats;
pub mod op;
pub mod patch;
pub mod registry;
pub mod store;
pub mod table;

pub use common::macros::MacroNames;
pub use common::media::{extract_images, ImageKind, ImageOptions, ImageRef};
pub use error::{EditError, FormatError};
pub use format::Format;
pub use formats::markdown::parser::{markdown_to_storage, markdown_to_storage_with};
pub use formats::markdown::serializer::{storage_to_markdown, storage_to_markdown_with};
pub use op::EditOp;
pub use patch::{insert_content, patch, InsertPosition};
pub use registry::FormatRegistry;
pub use store::{DocumentStore, MemoryStore, PageEditor, StoreError, StoredPage, TableOpResult};
