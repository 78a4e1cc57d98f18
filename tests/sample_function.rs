use std::sync::Arc;
use std::thread;

use arrow::array::{AsArray, RecordBatch};
use arrow::datatypes::{DataType, Float64Type, Int64Type};
use serde_json::json;

use flexfun::SampleFlexFunction;
use flexfun::model::config::Settings;
use flexfun::plugin::{
    DescriptorCommand, FlexFun, FunctionRuntime, FunctionStatus, Headers, Invocation, Parameters,
    ServerContext,
};

fn loaded_runtime() -> FunctionRuntime<SampleFlexFunction> {
    let ctx = ServerContext::new(Settings::defaults().unwrap());
    let mut runtime = FunctionRuntime::new();
    runtime.load(&ctx).unwrap();
    runtime
}

fn parameters(value: serde_json::Value) -> Parameters {
    match value {
        serde_json::Value::Object(map) => map,
        other => panic!("parameters must be an object, got {other}"),
    }
}

#[test]
fn create_and_call_directly() {
    let function = SampleFlexFunction::create();
    let result = function
        .call(&parameters(json!({ "some": "parameter" })), None, &Headers::new())
        .unwrap();

    assert_eq!(result.num_rows(), 6);
}

#[test]
fn listed_descriptor_names_the_function() {
    let runtime = loaded_runtime();
    let command = DescriptorCommand::from_slice(&runtime.descriptor().command()).unwrap();

    assert_eq!(command.function_name, "SampleFlexFunction");
    assert_eq!(runtime.status(), &FunctionStatus::Loaded);
}

#[test]
fn schema_matches_declared_types() {
    let descriptor = SampleFlexFunction::descriptor();
    let declared: Vec<(&str, &DataType)> = descriptor
        .schema()
        .fields()
        .iter()
        .map(|field| (field.name().as_str(), field.data_type()))
        .collect();

    assert_eq!(
        declared,
        [
            ("attribute1", &DataType::Utf8),
            ("attribute2", &DataType::Utf8),
            ("attribute3", &DataType::Boolean),
            ("fact1", &DataType::Float64),
            ("fact2", &DataType::Float64),
            ("fact3", &DataType::Int64),
        ]
    );
}

#[test]
fn function_call_returns_six_by_six() {
    let batch = loaded_runtime().invoke(&Invocation::default()).unwrap();

    assert_eq!(batch.num_rows(), 6);
    assert_eq!(batch.num_columns(), 6);
    assert_eq!(batch.schema(), SampleFlexFunction::schema());

    let attribute2: Vec<_> = batch
        .column_by_name("attribute2")
        .unwrap()
        .as_string::<i32>()
        .iter()
        .flatten()
        .collect();
    assert_eq!(
        attribute2,
        ["value1", "value2", "value3", "value1", "value2", "value3"]
    );

    let fact2 = batch.column_by_name("fact2").unwrap().as_primitive::<Float64Type>();
    assert_eq!(fact2.values().to_vec(), vec![0.1, 0.2, 0.3, 0.15, 0.25, 0.35]);
}

#[test]
fn parameters_and_headers_do_not_change_rows() {
    let runtime = loaded_runtime();
    let plain = runtime.invoke(&Invocation::default()).unwrap();
    let decorated = runtime
        .invoke(
            &Invocation::new(parameters(json!({ "year": 2024, "region": ["emea"] })))
                .with_header("authorization", "Bearer token")
                .with_header("traceparent", "00-abc-def-01"),
        )
        .unwrap();

    assert_eq!(plain, decorated);
}

#[test]
fn column_hint_returns_requested_subset() {
    let batch = loaded_runtime()
        .invoke(&Invocation::default().with_columns(["attribute1", "fact1"]))
        .unwrap();

    assert_eq!(batch.num_rows(), 6);
    let schema = batch.schema();
    for field in schema.fields() {
        let declared = SampleFlexFunction::schema();
        let expected = declared.field_with_name(field.name()).unwrap();
        assert_eq!(expected.data_type(), field.data_type());
    }
    assert!(schema.field_with_name("attribute1").is_ok());
    assert!(schema.field_with_name("fact1").is_ok());
    assert!(schema.field_with_name("fact3").is_err());
}

#[test]
fn concurrent_calls_share_static_data() {
    let runtime = Arc::new(loaded_runtime());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let runtime = Arc::clone(&runtime);
            thread::spawn(move || {
                let invocation = Invocation::new(parameters(json!({ "caller": i })));
                runtime.invoke(&invocation).unwrap()
            })
        })
        .collect();

    let batches: Vec<RecordBatch> = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .collect();

    for batch in &batches {
        let fact3 = batch.column_by_name("fact3").unwrap().as_primitive::<Int64Type>();
        assert_eq!(fact3.values().to_vec(), vec![111, 222, 333, 444, 555, 666]);
    }
}
