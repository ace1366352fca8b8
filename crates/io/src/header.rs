//! Write header scalars (time cycle, time stamp, element count).

use geonc_header::HeaderInfo;
use tracing::{debug, info};

use crate::data::DataBinder;
use crate::error::IoError;

/// Names of the scalar variables receiving header values.
///
/// `None` leaves that header value out. The [`Default`] names are
/// `timeCycle`, `timeStamp` and `nElems`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderVariables {
    time_cycle: Option<String>,
    time_stamp: Option<String>,
    n_elems: Option<String>,
}

impl Default for HeaderVariables {
    fn default() -> Self {
        Self {
            time_cycle: Some("timeCycle".into()),
            time_stamp: Some("timeStamp".into()),
            n_elems: Some("nElems".into()),
        }
    }
}

impl HeaderVariables {
    /// Set the time-cycle variable name, or `None` to skip it.
    pub fn with_time_cycle(mut self, name: Option<impl Into<String>>) -> Self {
        self.time_cycle = name.map(Into::into);
        self
    }

    /// Set the time-stamp variable name, or `None` to skip it.
    pub fn with_time_stamp(mut self, name: Option<impl Into<String>>) -> Self {
        self.time_stamp = name.map(Into::into);
        self
    }

    /// Set the element-count variable name, or `None` to skip it.
    pub fn with_n_elems(mut self, name: Option<impl Into<String>>) -> Self {
        self.n_elems = name.map(Into::into);
        self
    }

    /// Time-cycle variable name.
    pub fn time_cycle(&self) -> Option<&str> {
        self.time_cycle.as_deref()
    }

    /// Time-stamp variable name.
    pub fn time_stamp(&self) -> Option<&str> {
        self.time_stamp.as_deref()
    }

    /// Element-count variable name.
    pub fn n_elems(&self) -> Option<&str> {
        self.n_elems.as_deref()
    }
}

impl DataBinder<'_> {
    /// Write the configured header values as scalars.
    ///
    /// Each value is converted to the variable's declared integer type.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`DataBinder::write_scalar_u64`] for the first
    /// value that fails.
    pub fn write_header(
        &mut self,
        header: &HeaderInfo,
        vars: &HeaderVariables,
    ) -> Result<(), IoError> {
        let entries = [
            (vars.time_cycle(), header.time_cycle()),
            (vars.time_stamp(), header.time_stamp()),
            (vars.n_elems(), header.n_elems()),
        ];
        let mut n = 0;
        for (name, value) in entries {
            let Some(name) = name else { continue };
            debug!(variable = name, value, "writing header value");
            self.write_scalar_u64(name, value)?;
            n += 1;
        }
        info!(n, "header values written");
        Ok(())
    }
}
