//! On-disk formats written by the editor.
//!
//! Only one format exists today: the annotation archive, which bundles a
//! volume's image, its label mask and the paint color into a single file.

pub mod artifact;
