//! File-level entry points: open a model file, decode it, check its root
//! schema and hand the record to the matching loader.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use rb_pack::{read_message, Message, MessageError, ReaderOptions};
use tracing::{debug, instrument};

use crate::load::{
    load_rb_eim_evaluation_data, load_rb_evaluation_data, load_transient_rb_evaluation_data,
};
use crate::model::{RbEimModel, ReducedBasisModel, TransientRbModel};
use crate::scalar::{Number, Scalar};
use crate::schema::{
    select_root, RbEimEvaluationReader, RbEvaluationReader, SchemaId, TransientRbEvaluationReader,
};
use crate::LoadError;

#[cfg(feature = "scm")]
use crate::{load::load_rb_scm_evaluation_data, model::RbScmModel, schema::RbScmEvaluationReader};

/// Reads the whole file at `path` as one message. The file is closed before
/// this returns.
fn open_message(path: &Path, options: &ReaderOptions) -> Result<Message, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let message = read_message(BufReader::new(file), options).map_err(|err| match err {
        MessageError::Io(source) => LoadError::Read {
            path: path.to_path_buf(),
            source,
        },
        other => LoadError::Message(other),
    })?;
    debug!(root_tag = ?message.root_tag(), "decoded model file");
    Ok(message)
}

/// Loads a steady model from a file.
pub struct RbEvaluationDeserializer<'a, T: Scalar = Number> {
    model: &'a mut ReducedBasisModel<T>,
    options: ReaderOptions,
}

impl<'a, T: Scalar> RbEvaluationDeserializer<'a, T> {
    pub fn new(model: &'a mut ReducedBasisModel<T>) -> Self {
        Self {
            model,
            options: ReaderOptions::unlimited(),
        }
    }

    pub fn with_options(mut self, options: ReaderOptions) -> Self {
        self.options = options;
        self
    }

    #[instrument(
        name = "RbEvaluationDeserializer::read_from_file",
        skip_all,
        fields(path = %path.as_ref().display(), read_error_bound_data = read_error_bound_data)
    )]
    pub fn read_from_file(
        &mut self,
        path: impl AsRef<Path>,
        read_error_bound_data: bool,
    ) -> Result<(), LoadError> {
        let message = open_message(path.as_ref(), &self.options)?;
        let root = select_root(&message, SchemaId::rb_evaluation(T::REPRESENTATION))?;
        load_rb_evaluation_data(
            self.model,
            RbEvaluationReader::new(root)?,
            read_error_bound_data,
        )
    }
}

/// Loads a time-dependent model from a file.
pub struct TransientRbEvaluationDeserializer<'a, T: Scalar = Number> {
    model: &'a mut TransientRbModel<T>,
    options: ReaderOptions,
}

impl<'a, T: Scalar> TransientRbEvaluationDeserializer<'a, T> {
    pub fn new(model: &'a mut TransientRbModel<T>) -> Self {
        Self {
            model,
            options: ReaderOptions::unlimited(),
        }
    }

    pub fn with_options(mut self, options: ReaderOptions) -> Self {
        self.options = options;
        self
    }

    #[instrument(
        name = "TransientRbEvaluationDeserializer::read_from_file",
        skip_all,
        fields(path = %path.as_ref().display(), read_error_bound_data = read_error_bound_data)
    )]
    pub fn read_from_file(
        &mut self,
        path: impl AsRef<Path>,
        read_error_bound_data: bool,
    ) -> Result<(), LoadError> {
        let message = open_message(path.as_ref(), &self.options)?;
        let root = select_root(&message, SchemaId::transient_rb_evaluation(T::REPRESENTATION))?;
        let trans_record = TransientRbEvaluationReader::new(root)?;
        load_transient_rb_evaluation_data(
            self.model,
            trans_record.rb_evaluation()?,
            trans_record,
            read_error_bound_data,
        )
    }
}

/// Loads an empirical interpolation model from a file.
pub struct RbEimEvaluationDeserializer<'a, T: Scalar = Number> {
    model: &'a mut RbEimModel<T>,
    options: ReaderOptions,
}

impl<'a, T: Scalar> RbEimEvaluationDeserializer<'a, T> {
    pub fn new(model: &'a mut RbEimModel<T>) -> Self {
        Self {
            model,
            options: ReaderOptions::unlimited(),
        }
    }

    pub fn with_options(mut self, options: ReaderOptions) -> Self {
        self.options = options;
        self
    }

    #[instrument(
        name = "RbEimEvaluationDeserializer::read_from_file",
        skip_all,
        fields(path = %path.as_ref().display())
    )]
    pub fn read_from_file(&mut self, path: impl AsRef<Path>) -> Result<(), LoadError> {
        let message = open_message(path.as_ref(), &self.options)?;
        let root = select_root(&message, SchemaId::rb_eim_evaluation(T::REPRESENTATION))?;
        let eim_record = RbEimEvaluationReader::new(root)?;
        load_rb_eim_evaluation_data(self.model, eim_record.rb_evaluation()?, eim_record)
    }
}

/// Loads successive constraint method data from a file.
#[cfg(feature = "scm")]
pub struct RbScmEvaluationDeserializer<'a> {
    model: &'a mut RbScmModel,
    options: ReaderOptions,
}

#[cfg(feature = "scm")]
impl<'a> RbScmEvaluationDeserializer<'a> {
    pub fn new(model: &'a mut RbScmModel) -> Self {
        Self {
            model,
            options: ReaderOptions::unlimited(),
        }
    }

    pub fn with_options(mut self, options: ReaderOptions) -> Self {
        self.options = options;
        self
    }

    #[instrument(
        name = "RbScmEvaluationDeserializer::read_from_file",
        skip_all,
        fields(path = %path.as_ref().display())
    )]
    pub fn read_from_file(&mut self, path: impl AsRef<Path>) -> Result<(), LoadError> {
        let message = open_message(path.as_ref(), &self.options)?;
        let root = select_root(&message, SchemaId::RbScmEvaluation)?;
        load_rb_scm_evaluation_data(self.model, RbScmEvaluationReader::new(root)?)
    }
}
