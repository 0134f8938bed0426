//! Embedded-field flattening.
//!
//! Resolves the effective field set of a shape by merging the fields of its
//! embedded members. The traversal is breadth-first over the embedding graph
//! and keeps a single claim set for the whole walk:
//!
//! - every direct field of the outer shape is claimed first;
//! - embedded shapes are visited in claim order, so an earlier-embedded
//!   member is merged before a later one at the same depth, and a whole
//!   depth is merged before the next;
//! - a name that is already claimed is dropped, and a dropped embedded
//!   member is not descended into.
//!
//! The claim set only grows and a member is queued only when it claims a new
//! name, which bounds the walk even when a shape is reachable along several
//! embedding paths or points back at itself.

use std::collections::{HashSet, VecDeque};

use super::FieldMeta;
use crate::shape::{FieldDecl, Shape};

/// An embedded member waiting to be merged.
struct Pending {
    decl: &'static FieldDecl,
    path: Vec<&'static str>,
}

/// Flatten a shape into its claimed fields, in claim order.
pub fn flatten(shape: &'static Shape) -> Vec<FieldMeta> {
    let mut claimed: HashSet<&'static str> = HashSet::new();
    let mut fields = Vec::with_capacity(shape.fields.len());
    let mut queue = VecDeque::new();

    for decl in shape.fields {
        if !claimed.insert(decl.name) {
            continue;
        }
        fields.push(FieldMeta::from_decl(decl, Vec::new()));
        if decl.anonymous {
            queue.push_back(Pending {
                decl,
                path: vec![decl.name],
            });
        }
    }

    while let Some(Pending { decl, path }) = queue.pop_front() {
        // Embedding a non-struct kind promotes nothing.
        let Some(inner) = decl.ty.struct_shape() else {
            continue;
        };

        for field in inner.fields {
            if !claimed.insert(field.name) {
                continue;
            }
            fields.push(FieldMeta::from_decl(field, path.clone()));
            if field.anonymous {
                let mut next = path.clone();
                next.push(field.name);
                queue.push_back(Pending {
                    decl: field,
                    path: next,
                });
            }
        }
    }

    fields
}
