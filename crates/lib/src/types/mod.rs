//! Declared element types and their validation.
//!
//! A collection's declared type is either a primitive kind (`bool`, `int`, `float`,
//! `string`, `array`, `object`, plus their aliases) or the name of a class or interface
//! registered in a [`TypeRegistry`]. The name is resolved into a [`TypeDescriptor`]
//! once, when the collection's [`TypeValidator`] is built, and every insertion is then
//! checked against it.
//!
//! # Core Types
//!
//! - [`PrimitiveKind`] - The fixed kind table every element is classified by
//! - [`TypeRegistry`] - Known classes and interfaces with their hierarchy
//! - [`TypeDescriptor`] - A resolved declared type
//! - [`TypeValidator`] - Checks elements against an optional declared type

pub mod descriptor;
pub mod errors;
pub mod kind;
pub mod registry;
pub mod validator;

pub use descriptor::TypeDescriptor;
pub use errors::TypeError;
pub use kind::PrimitiveKind;
pub use registry::{Class, ClassDef, Interface, InterfaceDef, TypeDefinitions, TypeRegistry};
pub use validator::TypeValidator;
