//! Conversions from a decorated tool into each framework's native tool.

use serde_json::{Value, json};
use std::sync::Arc;
use toolspec_core::adapters::{
    AdkAdapter, CrewAiAdapter, HostType, LangChainAdapter, OpenAiAdapter, OpenAiTool,
};
use toolspec_core::{
    Adapter, Capabilities, Decorated, Framework, Kwargs, Registry, ToolContext, ToolError, WrappedTool,
    tool_spec,
};

#[tool_spec(name = "weather", description = "Get the weather for a city")]
fn weather(city: String, days: Option<u32>) -> Vec<String> {
    (0..days.unwrap_or(1))
        .map(|d| format!("{city}+{d}: sunny"))
        .collect()
}

#[tool_spec(description = "Fail loudly")]
fn explode(reason: String) -> Result<String, std::io::Error> {
    Err(std::io::Error::other(reason))
}

fn wrap(caps: Capabilities) -> WrappedTool {
    WeatherTool::decorator()
        .capabilities(caps)
        .wrap_into(WeatherTool::tool_function(), &Registry::new())
        .unwrap()
}

fn kwargs(value: Value) -> Kwargs {
    match value {
        Value::Object(map) => map,
        _ => Kwargs::new(),
    }
}

#[test]
fn missing_framework_is_reported_as_unavailable() {
    let tool = wrap(Capabilities::none());
    let err = tool.as_openai_tool().unwrap_err();
    assert!(matches!(
        err,
        ToolError::Unavailable {
            framework: Framework::OpenAi
        }
    ));
    assert!(err.to_string().contains("OpenAI support is unavailable"));

    // Only the missing framework fails.
    let tool = wrap(Capabilities::all().without(Framework::LangChain));
    assert!(tool.as_langchain_tool().unwrap_err().is_unavailable());
    assert!(tool.as_crewai_tool().is_ok());
}

#[test]
fn adapters_are_cached_per_framework() {
    let tool = wrap(Capabilities::all());

    let a = tool.adapter::<OpenAiAdapter>().unwrap();
    let b = tool.adapter::<OpenAiAdapter>().unwrap();
    assert!(Arc::ptr_eq(&a, &b));

    tool.as_adk_tool().unwrap();
    tool.as_crewai_tool().unwrap();
    tool.as_langchain_tool().unwrap();
    assert_eq!(
        tool.spec().cached_frameworks(),
        vec!["adk", "crewai", "langchain", "openai"]
    );
    assert!(Arc::ptr_eq(
        &tool.adapter::<AdkAdapter>().unwrap(),
        &tool.spec().get_adapter::<AdkAdapter>().unwrap()
    ));
}

#[test]
fn concurrent_conversions_share_one_adapter() {
    let tool = wrap(Capabilities::all());
    let adapters: Vec<Arc<CrewAiAdapter>> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|_| s.spawn(|| tool.adapter::<CrewAiAdapter>().unwrap()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert!(adapters.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
}

#[test]
fn openai_standard_definition() {
    let tool = wrap(Capabilities::none().with(Framework::OpenAi));
    let OpenAiTool::Function(def) = tool.as_openai_tool().unwrap() else {
        panic!("expected a function-calling definition");
    };
    assert_eq!(
        serde_json::to_value(&def).unwrap(),
        json!({
            "type": "function",
            "function": {
                "name": "weather",
                "description": "Get the weather for a city",
                "parameters": {
                    "type": "object",
                    "properties": {
                        "city": {"type": "string"},
                        "days": {"type": "integer"}
                    },
                    "required": ["city"]
                }
            }
        })
    );
}

#[tokio::test]
async fn openai_agents_tool_invokes_and_reports_errors() {
    let caps = Capabilities::none()
        .with(Framework::OpenAi)
        .with(Framework::OpenAiAgents);
    let tool = wrap(caps);
    let OpenAiTool::Agents(agent) = tool.as_openai_tool().unwrap() else {
        panic!("expected an agents function tool");
    };
    assert!(agent.strict_json_schema);
    assert_eq!(&agent.params_json_schema, tool.spec().input_schema());

    let out = agent
        .invoke(ToolContext::new().with_tool_call_id("call_1"), r#"{"city":"Oslo","days":2}"#)
        .await;
    assert_eq!(out, json!(["Oslo+0: sunny", "Oslo+1: sunny"]));

    let failing = ExplodeTool::decorator()
        .capabilities(caps)
        .wrap_into(ExplodeTool::tool_function(), &Registry::new())
        .unwrap();
    let OpenAiTool::Agents(agent) = failing.as_openai_tool().unwrap() else {
        panic!("expected an agents function tool");
    };
    let out = (agent.on_invoke_tool)(ToolContext::new(), r#"{"reason":"disk full"}"#.into()).await;
    assert_eq!(out, json!("Error executing tool: disk full"));
}

#[test]
fn langchain_structured_tool() {
    let tool = wrap(Capabilities::all()).as_langchain_tool().unwrap();
    assert_eq!(tool.name, "weather");
    let model = tool.args_schema.as_ref().unwrap();
    assert_eq!(model.name, "weatherSchema");
    assert_eq!(model.field("city").unwrap().host_type, HostType::Text);
    assert!(!model.field("days").unwrap().required);

    assert_eq!(
        tool.invoke(json!({"city": "Rome"})).unwrap(),
        json!(["Rome+0: sunny"])
    );
    assert!(matches!(
        tool.invoke(json!({"days": 2})).unwrap_err(),
        ToolError::InvalidInput(_)
    ));
}

#[tool_spec(name = "page_results", description = "First results for a query")]
fn page_results(query: String, #[schema(default = 2)] limit: u32) -> Vec<String> {
    (0..limit).map(|i| format!("{query}#{i}")).collect()
}

#[test]
fn langchain_null_optional_argument_uses_default() {
    let tool = PageResultsTool::decorator()
        .capabilities(Capabilities::all())
        .wrap_into(PageResultsTool::tool_function(), &Registry::new())
        .unwrap()
        .as_langchain_tool()
        .unwrap();
    assert!(!tool.args_schema.as_ref().unwrap().field("limit").unwrap().required);

    assert_eq!(
        tool.invoke(json!({"query": "rust", "limit": null})).unwrap(),
        json!(["rust#0", "rust#1"])
    );
    assert_eq!(
        tool.invoke(json!({"query": "rust", "limit": 1})).unwrap(),
        json!(["rust#0"])
    );
}

#[test]
fn crewai_tool_forwards_kwargs() {
    let tool = wrap(Capabilities::all()).as_crewai_tool().unwrap();
    assert_eq!(tool.description, "Get the weather for a city");
    assert_eq!(tool.args_schema.as_ref().unwrap().fields.len(), 2);
    assert_eq!(
        tool.run(kwargs(json!({"city": "Lima", "days": 1}))).unwrap(),
        json!(["Lima+0: sunny"])
    );
    // No args-model filtering: unknown keys reach the function.
    assert!(tool.run(kwargs(json!({"city": "Lima", "x": 1}))).is_err());
}

#[test]
fn adk_tool_backfills_description_and_schema() {
    let wrapped = wrap(Capabilities::all());
    let tool = wrapped.as_adk_tool().unwrap();
    assert_eq!(tool.name, "weather");
    assert_eq!(tool.description.as_deref(), Some("Get the weather for a city"));
    assert_eq!(tool.schema.as_ref(), Some(wrapped.spec().input_schema()));
    assert_eq!(
        tool.run(kwargs(json!({"city": "Kyiv"}))).unwrap(),
        json!(["Kyiv+0: sunny"])
    );

    let standalone = LangChainAdapter::new(Arc::clone(wrapped.spec().definition()), Capabilities::none());
    assert!(standalone.unwrap_err().is_unavailable());
}
