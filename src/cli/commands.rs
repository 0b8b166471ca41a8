use crate::binding::{Arguments, BindingPolicy, MethodParameter};
use crate::context::RequestContext;
use crate::dispatcher::Dispatcher;
use crate::handler::{FnHandler, Handler, HandlerResponse};
use crate::mapping::{MappingProvider, StaticMappingProvider};
use crate::middleware::TracingMiddleware;
use crate::object::ParameterType;
use crate::router::{BackingPathResolver, Router};
use crate::runtime_config::RuntimeConfig;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use http::Method;
use serde_json::json;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use super::content::{kind_of, load_mapping_file, render, Page, Widget};

/// Name of the content handler's backing parameter.
const CONTENT_PARAMETER: &str = "content";

/// Command-line interface for backing object dispatch
#[derive(Parser)]
#[command(name = "brrtrouter-backing")]
#[command(about = "Resolve request paths to backing objects", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Dispatch one request and print the response as JSON
    Resolve {
        /// YAML mapping file
        #[arg(short, long)]
        mappings: PathBuf,

        /// Request path (query string allowed)
        #[arg(short, long)]
        path: String,

        /// HTTP method
        #[arg(long, default_value = "GET")]
        method: String,

        /// Declared type of the content handler's backing parameter
        #[arg(long, value_enum, default_value_t = Expect::Any)]
        expect: Expect,

        /// Treat a backing object of the wrong type as a binding error
        #[arg(long, default_value_t = false)]
        strict: bool,

        /// Prefix stripped from the path before lookup (overrides BRRTR_MOUNT_ROOT)
        #[arg(long)]
        mount_root: Option<String>,
    },
    /// List mapped paths and the kind of object behind each
    Inspect {
        /// YAML mapping file
        #[arg(short, long)]
        mappings: PathBuf,
    },
}

/// Parameter type the content handler declares.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Expect {
    Widget,
    Page,
    Any,
}

impl Expect {
    fn parameter_type(self) -> ParameterType {
        match self {
            Expect::Widget => ParameterType::of::<Widget>(),
            Expect::Page => ParameterType::of::<Page>(),
            Expect::Any => ParameterType::any(),
        }
    }
}

/// Handler serving every mapped path: renders the injected backing object.
fn content_handler(expect: Expect) -> Arc<dyn Handler> {
    Arc::new(FnHandler::new(
        "render_content",
        vec![MethodParameter::backing(
            CONTENT_PARAMETER,
            expect.parameter_type(),
        )],
        |ctx: &RequestContext, args: Arguments| match args.get(CONTENT_PARAMETER) {
            Some(object) => {
                let mut body = render(object);
                body["path"] = json!(ctx.lookup_path());
                HandlerResponse::ok_json(body)
            }
            None => HandlerResponse::error(500, "content parameter missing"),
        },
    ))
}

fn health_handler() -> Arc<dyn Handler> {
    Arc::new(FnHandler::new("health", Vec::new(), |_: &RequestContext, _: Arguments| {
        HandlerResponse::ok_json(json!({ "status": "ok" }))
    }))
}

/// Assemble the pipeline used by `resolve`: the provider-backed resolver with a
/// static `/health` fallback, request tracing, and the standard argument resolvers.
///
/// # Errors
///
/// Returns an error if a static route pattern fails to compile.
pub fn build_dispatcher(
    provider: Arc<dyn MappingProvider>,
    expect: Expect,
    config: &RuntimeConfig,
) -> Result<Dispatcher> {
    let mut fallback = Router::new();
    fallback.add_route(Method::GET, "/health", health_handler())?;

    let mut dispatcher = Dispatcher::from_config(config);
    dispatcher.add_mapping(Arc::new(
        BackingPathResolver::new(provider, content_handler(expect)).with_fallback(fallback),
    ));
    dispatcher.add_middleware(Arc::new(TracingMiddleware));
    Ok(dispatcher)
}

/// Run `command`, writing its output to `out`.
///
/// # Errors
///
/// Returns an error if the mapping file cannot be loaded, the method is invalid,
/// or output cannot be written. Dispatch failures are reported as responses.
pub fn execute<W: Write>(command: &Commands, out: &mut W) -> Result<()> {
    match command {
        Commands::Resolve {
            mappings,
            path,
            method,
            expect,
            strict,
            mount_root,
        } => {
            let provider: Arc<dyn MappingProvider> = Arc::new(load_mapping_file(mappings)?);
            let mut config = RuntimeConfig::from_env();
            if *strict {
                config.binding_policy = BindingPolicy::Strict;
            }
            if let Some(root) = mount_root {
                config.mount_root = root.trim_end_matches('/').to_string();
            }
            let method: Method = method
                .to_uppercase()
                .parse()
                .with_context(|| format!("invalid HTTP method '{method}'"))?;

            let dispatcher = build_dispatcher(provider, *expect, &config)?;
            let mut ctx = RequestContext::new(method, path.as_str());
            let response = dispatcher.dispatch(&mut ctx);
            let output = json!({
                "request_id": ctx.request_id.to_string(),
                "status": response.status,
                "body": response.body,
            });
            writeln!(out, "{}", serde_json::to_string_pretty(&output)?)?;
            Ok(())
        }
        Commands::Inspect { mappings } => {
            let provider = load_mapping_file(mappings)?;
            write_inventory(&provider, out)
        }
    }
}

fn write_inventory<W: Write>(provider: &StaticMappingProvider, out: &mut W) -> Result<()> {
    for path in provider.paths() {
        let object = provider.retrieve_backing_object(&path)?;
        writeln!(out, "{path}\t{}", kind_of(&object))?;
    }
    Ok(())
}

/// Parse arguments from the process and execute the command against stdout
///
/// # Errors
///
/// See [`execute`].
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    execute(&cli.command, &mut out)
}
