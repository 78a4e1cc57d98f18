use arrow::array::RecordBatch;
use arrow::datatypes::SchemaRef;
use serde::{Deserialize, Serialize};

use crate::plugin::error::InvocationError;

/// Name and result schema of a function, fixed at registration.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDescriptor {
    name: String,
    schema: SchemaRef,
}

impl FunctionDescriptor {
    pub fn new(name: impl Into<String>, schema: SchemaRef) -> Self {
        Self {
            name: name.into(),
            schema,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema(&self) -> &SchemaRef {
        &self.schema
    }

    /// The JSON command the host uses to address this function on the wire.
    pub fn command(&self) -> Vec<u8> {
        DescriptorCommand::new(&self.name).to_vec()
    }

    /// Check that every column of `batch` is declared, with the declared type, at most once.
    pub fn validate_result(&self, batch: &RecordBatch) -> Result<(), InvocationError> {
        let schema = batch.schema();
        for (position, field) in schema.fields().iter().enumerate() {
            if schema.fields()[..position]
                .iter()
                .any(|earlier| earlier.name() == field.name())
            {
                return Err(InvocationError::DuplicateColumn(field.name().clone()));
            }

            let declared = self
                .schema
                .field_with_name(field.name())
                .map_err(|_| InvocationError::UnexpectedColumn(field.name().clone()))?;

            if declared.data_type() != field.data_type() {
                return Err(InvocationError::TypeMismatch {
                    column: field.name().clone(),
                    expected: declared.data_type().clone(),
                    actual: field.data_type().clone(),
                });
            }
        }

        Ok(())
    }
}

/// `{"function_name": "..."}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescriptorCommand {
    pub function_name: String,
}

impl DescriptorCommand {
    pub fn new(function_name: impl Into<String>) -> Self {
        Self {
            function_name: function_name.into(),
        }
    }

    pub fn from_slice(raw: &[u8]) -> Result<Self, serde_json::Error> {
        let command: Self = serde_json::from_slice(raw)?;
        if command.function_name.is_empty() {
            return Err(serde::de::Error::custom("function_name must not be empty"));
        }
        Ok(command)
    }

    pub fn to_vec(&self) -> Vec<u8> {
        serde_json::to_vec(self).unwrap_or_default()
    }
}
