//! Recorder for intermediate pipeline arrays
//!
//! An enabled recorder writes each array into a store group, once per name.
//! A disabled recorder performs the same validation and writes nothing, so
//! pipeline code can record unconditionally.

use ndarray::{ArrayBase, Data, Dimension};
use tracing::debug;

use crate::io::configuration::DEFAULT_RECORDER_GROUP;
use crate::io::error::{ArrayError, Result};
use crate::io::store::{Group, Storable};

/// Writes named intermediate arrays into a group, or only validates them
#[derive(Debug)]
pub struct ArrayRecorder<'a> {
    target: Option<&'a mut Group>,
}

impl<'a> ArrayRecorder<'a> {
    /// Recorder writing into `group_name` below `group`
    ///
    /// An empty `group_name` writes into `group` itself. With
    /// `overwrite_group`, an existing subgroup is emptied first.
    ///
    /// # Errors
    ///
    /// Returns `Conflict` if `group_name` names a non-group entry and
    /// `overwrite_group` is not set.
    pub fn enabled(group: &'a mut Group, group_name: &str, overwrite_group: bool) -> Result<Self> {
        let target = if group_name.is_empty() {
            group
        } else {
            group.create_group(group_name, overwrite_group)?
        };
        Ok(Self {
            target: Some(target),
        })
    }

    /// Recorder writing into the [`DEFAULT_RECORDER_GROUP`] subgroup of `group`
    ///
    /// # Errors
    ///
    /// Same as [`ArrayRecorder::enabled`].
    pub fn in_default_group(group: &'a mut Group, overwrite_group: bool) -> Result<Self> {
        Self::enabled(group, DEFAULT_RECORDER_GROUP, overwrite_group)
    }

    /// Recorder that validates arrays and discards them
    pub const fn disabled() -> Self {
        Self { target: None }
    }

    /// Whether recorded arrays are written
    pub const fn is_enabled(&self) -> bool {
        self.target.is_some()
    }

    /// Record `array` under `name`
    ///
    /// # Errors
    ///
    /// Returns `EmptyPayload` for an array without elements (in both modes)
    /// and, when enabled, `Conflict` if `name` was already recorded in this
    /// group.
    pub fn record<T, S, D>(&mut self, name: &str, array: &ArrayBase<S, D>) -> Result<()>
    where
        T: Storable,
        S: Data<Elem = T>,
        D: Dimension,
    {
        if array.is_empty() {
            return Err(ArrayError::EmptyPayload {
                name: name.to_string(),
            });
        }

        match self.target.as_deref_mut() {
            Some(group) => {
                debug!(name, shape = ?array.shape(), "recording array");
                group.write(name, array, false)
            }
            None => Ok(()),
        }
    }

    /// Recorder scoped to a subgroup of this one
    ///
    /// A disabled recorder yields another disabled recorder.
    ///
    /// # Errors
    ///
    /// Same as [`ArrayRecorder::enabled`].
    pub fn subgroup(&mut self, group_name: &str, overwrite_group: bool) -> Result<ArrayRecorder<'_>> {
        match self.target.as_deref_mut() {
            Some(group) => ArrayRecorder::enabled(group, group_name, overwrite_group),
            None => Ok(ArrayRecorder::disabled()),
        }
    }
}
