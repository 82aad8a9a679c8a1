use crate::OutputFormat;
use crate::util::{CliResult, read_input};
use clap::Args;
use owo_colors::{OwoColorize, Stream};
use serde::Serialize;
use std::fmt::Write;
use std::path::PathBuf;
use std::sync::Arc;
use xbfload_core::{ContainerKind, CustomRuntimeData, ObjectRef, Value};
use xbfload_writer::{ContainerPolicy, ObjectWriter, WriterOptions};

#[derive(Args, Debug, Clone)]
pub struct LoadArgs {
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
    #[arg(long = "format", value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    #[arg(long = "max-deferred-depth", value_name = "N", help = "Limit nested deferred-property realizations.")]
    pub max_deferred_depth: Option<usize>,
    #[arg(long = "max-scope-depth", value_name = "N", help = "Limit nested namespace scopes.")]
    pub max_scope_depth: Option<usize>,
    #[arg(long = "strict-containers", help = "Fail when an object receives both collection items and dictionary entries.")]
    pub strict_containers: bool,
    #[arg(long = "no-class-heuristic", help = "Do not treat a leading PushConstant as the x:Class name.")]
    pub no_class_heuristic: bool,
    #[arg(long = "no-color", help = "Disable ANSI colors in text output.")]
    pub no_color: bool,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub(crate) struct MemberSummary {
    name: String,
    value: ValueSummary,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "type")]
pub enum ValueSummary {
    Object {
        type_name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        container: Option<&'static str>,
        #[serde(skip_serializing_if = "std::ops::Not::not")]
        markup_extension: bool,
        namespaces: Vec<(String, String)>,
        properties: Vec<MemberSummary>,
        items: Vec<ValueSummary>,
        entries: Vec<MemberSummary>,
        names: Vec<String>,
    },
    /// An object already being printed further up the tree.
    Cycle { type_name: String },
    Constant { value: String },
    TypeConverted { target: String, value: String },
    Type { name: String },
    Property { name: String },
    StaticResource { key: String },
    ThemeResource { key: String },
    TemplateBinding { property: String },
    RuntimeData { data: Arc<CustomRuntimeData> },
}

pub fn run(args: &LoadArgs) -> CliResult<String> {
    if args.no_color {
        owo_colors::set_override(false);
    }
    let input = read_input(&args.file)?;

    let root = ObjectWriter::new(&input.metadata, &input.document)
        .with_options(writer_options(args))
        .process_document()?;
    let summary = summarize_value(&root, &mut Vec::new());

    let output = match args.format {
        OutputFormat::Text => render_load_text(&summary),
        OutputFormat::Json => render_load_json(&summary)?,
    };
    Ok(output)
}

fn writer_options(args: &LoadArgs) -> WriterOptions {
    let mut options = WriterOptions::new().with_class_name_heuristic(!args.no_class_heuristic);
    if let Some(depth) = args.max_deferred_depth {
        options = options.with_max_deferred_depth(depth);
    }
    if let Some(depth) = args.max_scope_depth {
        options = options.with_max_scope_depth(depth);
    }
    if args.strict_containers {
        options = options.with_container_policy(ContainerPolicy::Strict);
    }
    options
}

pub(crate) fn summarize_value(value: &Value, ancestors: &mut Vec<ObjectRef>) -> ValueSummary {
    match value {
        Value::Object(object) => summarize_object(object, ancestors),
        Value::Constant(constant) => ValueSummary::Constant { value: constant.to_string() },
        Value::TypeConverted { target, value } => {
            ValueSummary::TypeConverted { target: target.name.to_string(), value: value.to_string() }
        }
        Value::Type(info) => ValueSummary::Type { name: info.name.to_string() },
        Value::Property(info) => ValueSummary::Property { name: info.name.to_string() },
        Value::StaticResource(key) => ValueSummary::StaticResource { key: key.to_string() },
        Value::ThemeResource(key) => ValueSummary::ThemeResource { key: key.to_string() },
        Value::TemplateBinding(info) => ValueSummary::TemplateBinding { property: info.name.to_string() },
        Value::RuntimeData(data) => ValueSummary::RuntimeData { data: Arc::clone(data) },
    }
}

fn summarize_object(object: &ObjectRef, ancestors: &mut Vec<ObjectRef>) -> ValueSummary {
    if ancestors.contains(object) {
        return ValueSummary::Cycle { type_name: object.type_name().to_string() };
    }
    ancestors.push(object.clone());

    let properties = object
        .properties()
        .into_iter()
        .map(|(name, value)| MemberSummary { name: name.to_string(), value: summarize_value(&value, ancestors) })
        .collect();
    let items = object.items().iter().map(|item| summarize_value(item, ancestors)).collect();
    let entries = object
        .entries()
        .into_iter()
        .map(|(key, value)| MemberSummary { name: key.to_string(), value: summarize_value(&value, ancestors) })
        .collect();

    ancestors.pop();

    ValueSummary::Object {
        type_name: object.type_name().to_string(),
        container: match object.container_kind() {
            ContainerKind::None => None,
            ContainerKind::Collection => Some("collection"),
            ContainerKind::Dictionary => Some("dictionary"),
        },
        markup_extension: object.is_markup_extension(),
        namespaces: object
            .namespaces()
            .into_iter()
            .map(|(prefix, namespace)| (prefix.to_string(), namespace.to_string()))
            .collect(),
        properties,
        items,
        entries,
        names: object.names().iter().map(ToString::to_string).collect(),
    }
}

fn colorize_type(label: &str) -> String {
    label
        .if_supports_color(Stream::Stdout, |text| text.bold().fg_rgb::<79, 166, 255>().to_string())
        .to_string()
}

fn colorize_member(name: &str) -> String {
    name.if_supports_color(Stream::Stdout, |text| text.bold().fg_rgb::<241, 149, 255>().to_string())
        .to_string()
}

fn colorize_scalar(value: &str) -> String {
    value.if_supports_color(Stream::Stdout, |text| text.fg_rgb::<136, 192, 74>().to_string()).to_string()
}

fn colorize_detail(value: &str) -> String {
    value.if_supports_color(Stream::Stdout, |text| text.dimmed().to_string()).to_string()
}

fn format_scalar(value: &ValueSummary) -> Option<String> {
    let text = match value {
        ValueSummary::Object { .. } => return None,
        ValueSummary::Cycle { type_name } => format!("<{type_name}> (cycle)"),
        ValueSummary::Constant { value } => {
            serde_json::to_string(value).unwrap_or_else(|_| format!("\"{}\"", value.replace('"', "\\\"")))
        }
        ValueSummary::TypeConverted { target, value } => format!("{target}({value})"),
        ValueSummary::Type { name } => format!("{{x:Type {name}}}"),
        ValueSummary::Property { name } => name.clone(),
        ValueSummary::StaticResource { key } => format!("{{StaticResource {key}}}"),
        ValueSummary::ThemeResource { key } => format!("{{ThemeResource {key}}}"),
        ValueSummary::TemplateBinding { property } => format!("{{TemplateBinding {property}}}"),
        ValueSummary::RuntimeData { data } => {
            format!("{{{:?} v{} stream {}}}", data.payload.kind(), data.version, data.stream)
        }
    };
    Some(text)
}

fn write_value(output: &mut String, indent: usize, prefix: &str, value: &ValueSummary) {
    let pad = "    ".repeat(indent);

    if let Some(scalar) = format_scalar(value) {
        let _ = writeln!(output, "{pad}{prefix}{}", colorize_scalar(&scalar));
        return;
    }
    let ValueSummary::Object {
        type_name,
        container,
        markup_extension,
        namespaces,
        properties,
        items,
        entries,
        names,
    } = value
    else {
        return;
    };

    let mut details = Vec::new();
    if let Some(container) = container {
        details.push((*container).to_owned());
    }
    if *markup_extension {
        details.push("markup extension".to_owned());
    }
    let details =
        if details.is_empty() { String::new() } else { format!(" {}", colorize_detail(&format!("({})", details.join(", ")))) };
    let _ = writeln!(output, "{pad}{prefix}{}{details}", colorize_type(type_name));

    let inner = "    ".repeat(indent + 1);
    for (prefix, namespace) in namespaces {
        let declared = if prefix.is_empty() { "xmlns".to_owned() } else { format!("xmlns:{prefix}") };
        let _ = writeln!(output, "{inner}{} = {}", colorize_member(&declared), colorize_scalar(namespace));
    }
    for member in properties {
        let prefix = format!("{} = ", colorize_member(&member.name));
        write_value(output, indent + 1, &prefix, &member.value);
    }
    for item in items {
        write_value(output, indent + 1, "- ", item);
    }
    for entry in entries {
        let prefix = format!("{} = ", colorize_member(&format!("[{}]", entry.name)));
        write_value(output, indent + 1, &prefix, &entry.value);
    }
    if !names.is_empty() {
        let _ = writeln!(output, "{inner}{}", colorize_detail(&format!("names: {}", names.join(", "))));
    }
}

pub(crate) fn render_load_text(root: &ValueSummary) -> String {
    let mut output = String::new();
    write_value(&mut output, 0, "", root);
    output.trim_end().to_owned()
}

pub(crate) fn render_load_json(root: &ValueSummary) -> CliResult<String> {
    Ok(serde_json::to_string_pretty(root)?)
}
