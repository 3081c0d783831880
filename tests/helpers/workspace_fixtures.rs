//! Workspaces and models shared by the integration tests.

use std::sync::Arc;

use flexuml::workspace::{ClassDecl, InMemoryWorkspace};
use flexuml::{ModelConfig, UmlDataModel};

use super::collaborators::{RecordingBuilder, ScriptedPrompter};

/// `com.acme` with `A`, `B extends A`, interface `I`, and
/// `C extends B implements I`.
pub fn acme_workspace() -> Arc<InMemoryWorkspace> {
    Arc::new(InMemoryWorkspace::new().with_classes([
        ClassDecl::class("com.acme.A"),
        ClassDecl::class("com.acme.B").extends("com.acme.A"),
        ClassDecl::interface("com.acme.I"),
        ClassDecl::class("com.acme.C")
            .extends("com.acme.B")
            .implements("com.acme.I"),
    ]))
}

/// A model plus the scripted collaborators behind it.
pub struct Fixture {
    pub workspace: Arc<InMemoryWorkspace>,
    pub prompter: Arc<ScriptedPrompter>,
    pub builder: Arc<RecordingBuilder>,
    pub model: UmlDataModel,
}

/// A reconciled model opened on `package`, confirming every prompt.
pub fn package_fixture(workspace: Arc<InMemoryWorkspace>, package: &str) -> Fixture {
    package_fixture_with(workspace, package, ScriptedPrompter::answering(true))
}

pub fn package_fixture_with(
    workspace: Arc<InMemoryWorkspace>,
    package: &str,
    prompter: ScriptedPrompter,
) -> Fixture {
    let prompter = Arc::new(prompter);
    let builder = Arc::new(RecordingBuilder::default());
    let host = workspace
        .host(prompter.clone())
        .with_builder(builder.clone());
    let model = UmlDataModel::for_package(host, ModelConfig::default(), package);
    model.update();
    Fixture {
        workspace,
        prompter,
        builder,
        model,
    }
}

/// A reconciled model opened on class `fqn`.
pub fn class_fixture(workspace: Arc<InMemoryWorkspace>, fqn: &str) -> Fixture {
    let prompter = Arc::new(ScriptedPrompter::answering(true));
    let builder = Arc::new(RecordingBuilder::default());
    let host = workspace
        .host(prompter.clone())
        .with_builder(builder.clone());
    let model = UmlDataModel::for_class(host, ModelConfig::default(), fqn)
        .unwrap_or_else(|| panic!("class '{}' should resolve", fqn));
    model.update();
    Fixture {
        workspace,
        prompter,
        builder,
        model,
    }
}
