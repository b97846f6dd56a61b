//! Binary weight files.
//!
//! Layout (bincode's default fixed-width little-endian encoding):
//!
//! ```text
//! u64                 table count
//! repeated per table, in declaration order:
//!   u64               weight count
//!   f32 * count       weights
//! ```
//!
//! A file is only meaningful for the sampling plan and alphabet that wrote
//! it; loading checks the table count and every table length against the
//! network's own plan.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::error::PersistError;

use super::network::{NTupleNetwork, WeightTable};
use super::sampling::SamplingPlan;

/// Encode tables to any writer.
pub fn write_tables<W: Write>(writer: W, tables: &[WeightTable]) -> bincode::Result<()> {
    bincode::serialize_into(writer, tables)
}

/// Decode tables from any reader.
pub fn read_tables<R: Read>(reader: R) -> bincode::Result<Vec<WeightTable>> {
    bincode::deserialize_from(reader)
}

impl NTupleNetwork {
    /// Write every table to `path`, replacing any existing file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), PersistError> {
        let path = path.as_ref();
        let io_err = |source| PersistError::Io {
            path: path.to_path_buf(),
            source,
        };

        let file = File::create(path).map_err(io_err)?;
        let mut writer = BufWriter::new(file);
        write_tables(&mut writer, self.tables()).map_err(|source| PersistError::Encode {
            path: path.to_path_buf(),
            source,
        })?;
        writer.flush().map_err(io_err)?;

        log::info!("saved {} weight tables to {}", self.table_count(), path.display());
        Ok(())
    }

    /// Replace the tables with the contents of `path`.
    ///
    /// On any error the current tables are left untouched.
    pub fn load_into(&mut self, path: impl AsRef<Path>) -> Result<(), PersistError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| PersistError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let tables = read_tables(BufReader::new(file)).map_err(|source| PersistError::Decode {
            path: path.to_path_buf(),
            source,
        })?;

        if tables.len() != self.table_count() {
            return Err(PersistError::TableCount {
                path: path.to_path_buf(),
                expected: self.table_count(),
                found: tables.len(),
            });
        }
        for (table, (loaded, current)) in tables.iter().zip(self.tables()).enumerate() {
            if loaded.len() != current.len() {
                return Err(PersistError::TableSize {
                    path: path.to_path_buf(),
                    table,
                    expected: current.len(),
                    found: loaded.len(),
                });
            }
        }

        self.replace_tables(tables);
        log::info!("loaded {} weight tables from {}", self.table_count(), path.display());
        Ok(())
    }

    /// A network for `plan` with weights from `path`.
    ///
    /// When the file does not exist and `init_if_missing` is set, returns
    /// fresh zero tables instead. Every other failure is returned.
    pub fn open(
        plan: SamplingPlan,
        alphabet: usize,
        path: impl AsRef<Path>,
        init_if_missing: bool,
    ) -> Result<Self, PersistError> {
        Self::new(plan, alphabet).with_weights_from(path, init_if_missing)
    }

    /// This network with its tables loaded from `path`, following the same
    /// missing-file rule as [`NTupleNetwork::open`].
    pub fn with_weights_from(
        mut self,
        path: impl AsRef<Path>,
        init_if_missing: bool,
    ) -> Result<Self, PersistError> {
        let path = path.as_ref();
        match self.load_into(path) {
            Ok(()) => Ok(self),
            Err(err) if init_if_missing && err.is_not_found() => {
                log::info!("{} not found, starting from zero weights", path.display());
                Ok(self)
            }
            Err(err) => Err(err),
        }
    }
}
