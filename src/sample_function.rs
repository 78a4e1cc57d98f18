use std::sync::{Arc, LazyLock};

use arrow::array::{ArrayRef, BooleanArray, Float64Array, Int64Array, RecordBatch, StringArray};
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};

use crate::plugin::{FlexFun, Headers, InitError, InvocationError, Parameters, ServerContext};

/// Setting that turns on logging of the column hint.
pub const LOG_COLUMNS_SETTING: &str = "sample_function.log_columns";

static SCHEMA: LazyLock<SchemaRef> = LazyLock::new(|| Arc::new(schema()));

static STATIC_DATA: LazyLock<RecordBatch> = LazyLock::new(static_data);

/// Prefer using the pre-computed SCHEMA
fn schema() -> Schema {
    Schema::new(vec![
        Field::new("attribute1", DataType::Utf8, true),
        Field::new("attribute2", DataType::Utf8, true),
        Field::new("attribute3", DataType::Boolean, true),
        Field::new("fact1", DataType::Float64, true),
        Field::new("fact2", DataType::Float64, true),
        Field::new("fact3", DataType::Int64, true),
    ])
}

fn static_data() -> RecordBatch {
    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from(vec!["id1", "id2", "id3", "id4", "id5", "id6"])),
        Arc::new(StringArray::from(vec![
            "value1", "value2", "value3", "value1", "value2", "value3",
        ])),
        Arc::new(BooleanArray::from(vec![true, true, true, false, false, false])),
        Arc::new(Float64Array::from(vec![123.456, 23.45, 8.76, 1.23, 34.56, 567.89])),
        Arc::new(Float64Array::from(vec![0.1, 0.2, 0.3, 0.15, 0.25, 0.35])),
        Arc::new(Int64Array::from(vec![111, 222, 333, 444, 555, 666])),
    ];

    // Column lengths and types are fixed above and match SCHEMA.
    RecordBatch::try_new(SCHEMA.clone(), columns).unwrap_or_else(|err| {
        unreachable!("static data does not match its schema: {err}")
    })
}

/// A sample FlexFunction serving static data.
///
/// Its name and schema are what the host publishes to the semantic model:
/// the name identifies the function and the schema's columns become the data
/// set's columns. `call` is where a real function would inspect `parameters`
/// and compute its result.
///
/// When the caller passes a column hint, only those columns are returned.
/// The hint is a bandwidth optimization; the rows are the same either way.
#[derive(Debug, Default)]
pub struct SampleFlexFunction {
    log_columns: bool,
}

impl FlexFun for SampleFlexFunction {
    const NAME: &'static str = "SampleFlexFunction";

    fn schema() -> SchemaRef {
        SCHEMA.clone()
    }

    fn create() -> Self {
        Self::default()
    }

    fn on_load(&mut self, ctx: &ServerContext) -> Result<(), InitError> {
        self.log_columns = match ctx.settings().get(LOG_COLUMNS_SETTING) {
            None => false,
            Some(value) => value.as_bool().ok_or_else(|| InitError::InvalidSetting {
                key: LOG_COLUMNS_SETTING.to_string(),
                reason: format!("expected a boolean, got {value}"),
            })?,
        };

        tracing::debug!(log_columns = self.log_columns, "sample function initialized");
        Ok(())
    }

    fn call(
        &self,
        parameters: &Parameters,
        columns: Option<&[String]>,
        _headers: &Headers,
    ) -> Result<RecordBatch, InvocationError> {
        if self.log_columns {
            tracing::info!(?parameters, ?columns, "function_called");
        } else {
            tracing::info!(?parameters, "function_called");
        }

        match columns {
            Some(columns) if !columns.is_empty() => project(columns),
            _ => Ok(STATIC_DATA.clone()),
        }
    }
}

/// Requested columns form a set: repeats keep their first position.
fn project(columns: &[String]) -> Result<RecordBatch, InvocationError> {
    let mut indices = Vec::with_capacity(columns.len());
    for name in columns {
        let index = SCHEMA
            .index_of(name)
            .map_err(|_| InvocationError::UnknownColumn(name.clone()))?;
        if !indices.contains(&index) {
            indices.push(index);
        }
    }

    Ok(STATIC_DATA.project(&indices)?)
}
