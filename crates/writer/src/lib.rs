//! Object-graph writer for decoded XBF node streams.
//!
//! [`ObjectWriter`] interprets a [`NodeStream`](xbfload_core::NodeStream) with a
//! combined pre-order/post-order walk over an object stack and a namespace
//! scope stack, and yields the single root value of the stream together with
//! its namescope. Deferred properties are realized by nested writers seeded
//! with a clone of the enclosing context.
//!
//! ```
//! use xbfload_core::{Constant, NodeKind, PropertyIndex, StaticMetadata, TypeIndex, XbfDocument};
//! use xbfload_writer::ObjectWriter;
//!
//! let metadata = StaticMetadata::builder()
//!     .with_type(1, "TextBlock")
//!     .with_type(2, "String")
//!     .with_property(1, "Text", 1, 2)
//!     .build()
//!     .unwrap();
//! let document = XbfDocument::new(vec![
//!     [
//!         NodeKind::PushScopeCreateTypeBeginInit { type_index: TypeIndex(1) },
//!         NodeKind::SetValueConstant { property: PropertyIndex(1), value: Constant::from("hello") },
//!         NodeKind::EndInitPopScope,
//!     ]
//!     .into_iter()
//!     .collect(),
//! ]);
//!
//! let root = ObjectWriter::new(&metadata, &document).process_document().unwrap();
//! let text_block = root.as_object().unwrap();
//! assert_eq!(text_block.property("Text").unwrap().as_str(), Some("hello"));
//! ```

mod error;
mod options;
pub mod runtime_data;
pub mod scope;
mod writer;

pub use error::{RuntimeDataError, WriterError};
pub use options::{ContainerPolicy, WriterOptions};
pub use runtime_data::DecoderRegistry;
pub use scope::{NamespaceFrame, SavedContext, ScopeStacks};
pub use writer::ObjectWriter;
