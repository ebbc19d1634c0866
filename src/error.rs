/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

use crate::tree::NodeId;
use std::collections::TryReserveError;
use thiserror::Error;

/// The arena could not grow to hold one more node.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to allocate a tree node")]
pub struct AllocError {
    #[from]
    source: TryReserveError,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InsertError {
    #[error("an equal payload is already stored at {0:?}")]
    Duplicate(NodeId),
    #[error(transparent)]
    Alloc(#[from] AllocError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReplaceError {
    #[error("{0:?} does not designate a live node")]
    NotANode(NodeId),
    #[error(transparent)]
    Alloc(#[from] AllocError),
}
