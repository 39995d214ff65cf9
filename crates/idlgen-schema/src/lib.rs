//! # idlgen-schema — Schema Document Scanning
//!
//! Reads DDS XML type documents and normalizes them into the
//! [`idlgen_core::Declaration`] model the registry consumes.
//!
//! ## Pipeline
//!
//! 1. [`xml`] parses a document into a generic [`XmlNode`] tree.
//! 2. [`normalize`] walks the tree with the enclosing module path and
//!    decides, once per node, whether it is a typedef, enumeration, or
//!    struct. Declared names come out fully qualified.
//! 3. [`corpus`] loads single documents or whole directories and registers
//!    their declarations, skipping documents that fail to parse.
//!
//! ## Recognized Markup
//!
//! ```xml
//! <types>
//!   <module name="P_NSTEL">
//!     <typedef name="T_Int32" type="int32"/>
//!     <enum name="E_Status"><enumerator name="ACTIVE"/></enum>
//!     <struct name="C_Vehicle" baseType="P_NSTEL::C_Base">
//!       <member name="A_Id" type="nonBasic" nonBasicTypeName="P_NSTEL::T_Int32"/>
//!       <member name="A_Tags" type="string" sequenceMaxLength="8"/>
//!     </struct>
//!   </module>
//! </types>
//! ```

pub mod corpus;
pub mod normalize;
pub mod xml;

pub use corpus::{schema_files, scan_directory, ScanReport, SchemaDocument, Topic};
pub use normalize::{declarations, structs_with_namespace, types_root};
pub use xml::{parse_document, XmlNode};
