// Copyright 2021-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Slice-view plumbing shared by every repeated field of the trees.
//!
//! A slice view is a lightweight, non-owning handle over an ordered sequence
//! owned by some aggregate. The view never owns memory; the borrow it holds
//! ties its lifetime to the owning tree, so a view structurally cannot
//! outlive the storage it aliases.

/// Backing storage of an aggregate root: owned by the root itself, or
/// borrowed from an external owner at the wire-codec boundary. Borrowed
/// storage is shared; mutations through the root are visible to the external
/// owner as well.
pub(crate) enum Storage<'a, T> {
    Owned(Vec<T>),
    Borrowed(&'a mut Vec<T>),
}

impl<T> Storage<'_, T> {
    pub(crate) fn rows(&self) -> &Vec<T> {
        match self {
            Storage::Owned(rows) => rows,
            Storage::Borrowed(rows) => rows,
        }
    }

    pub(crate) fn rows_mut(&mut self) -> &mut Vec<T> {
        match self {
            Storage::Owned(rows) => rows,
            Storage::Borrowed(rows) => rows,
        }
    }
}

/// Defines a slice-view type and its per-element view type over a repeated
/// wire-schema field. Every repeated field in the trees goes through this
/// one contract: `len`, bounds-checked in-place `at`, zero-initializing
/// `append`, and deep, resizing `copy_to`.
macro_rules! pdata_slice {
    (
        $(#[$slice_meta:meta])*
        $slice:ident,
        $(#[$view_meta:meta])*
        $view:ident,
        $elem:ty
    ) => {
        $(#[$slice_meta])*
        pub struct $slice<'a> {
            pub(crate) elems: &'a mut ::std::vec::Vec<$elem>,
        }

        impl<'a> $slice<'a> {
            pub(crate) fn new(elems: &'a mut ::std::vec::Vec<$elem>) -> Self {
                Self { elems }
            }

            /// Returns the number of elements in the sequence.
            pub fn len(&self) -> usize {
                self.elems.len()
            }

            /// True if the sequence holds no elements.
            pub fn is_empty(&self) -> bool {
                self.elems.is_empty()
            }

            /// Returns a view aliasing the element at `index` in place;
            /// mutations through the view write directly into the owner's
            /// storage.
            ///
            /// Panics when `index >= len()`: indexing out of range is an
            /// invalid use of the view, not a recoverable condition.
            pub fn at(&mut self, index: usize) -> $view<'_> {
                $view::new(&mut self.elems[index])
            }

            /// Grows the owner's storage by one zero-initialized element and
            /// returns a view over it.
            pub fn append(&mut self) -> $view<'_> {
                let index = self.elems.len();
                self.elems.push(<$elem>::default());
                $view::new(&mut self.elems[index])
            }

            /// Replaces `dest`'s entire contents with a deep element-wise
            /// copy of this sequence, resizing `dest` to match and recursing
            /// into any nested sequences held by the elements.
            pub fn copy_to(&self, dest: &mut $slice<'_>) {
                dest.elems.clone_from(&*self.elems);
            }
        }

        $(#[$view_meta])*
        pub struct $view<'a> {
            pub(crate) msg: &'a mut $elem,
        }

        impl<'a> $view<'a> {
            pub(crate) fn new(msg: &'a mut $elem) -> Self {
                Self { msg }
            }
        }
    };
}

pub(crate) use pdata_slice;
