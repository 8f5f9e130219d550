//! Name-keyed comparator factory.

use super::{
    Comparator, DotCmp, FrcCmp, OptVarianceCmp, Params, PhaseCmp, VarianceCmp,
};
use crate::image::Volume;
use crate::trace::trace_span;
use crate::util::{VoxFiltError, VoxFiltResult};
use std::collections::HashMap;
use std::fmt::Write as _;
use std::sync::OnceLock;

/// Constructor stored in a registry.
pub type ComparatorFactory = fn() -> Box<dyn Comparator>;

/// Map from comparator name to constructor.
#[derive(Clone, Debug, Default)]
pub struct ComparatorRegistry {
    factories: HashMap<&'static str, ComparatorFactory>,
}

impl ComparatorRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in comparators.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(|| Box::new(DotCmp::new()));
        registry.register(|| Box::new(VarianceCmp::new()));
        registry.register(|| Box::new(OptVarianceCmp::new()));
        registry.register(|| Box::new(PhaseCmp::new()));
        registry.register(|| Box::new(FrcCmp::new()));
        registry
    }

    /// Registers `factory` under the name of the comparator it builds,
    /// replacing any previous entry. Returns that name.
    pub fn register(&mut self, factory: ComparatorFactory) -> &'static str {
        let name = factory().name();
        self.factories.insert(name, factory);
        name
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.factories.keys().copied().collect();
        names.sort_unstable();
        names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    pub fn create(&self, name: &str) -> VoxFiltResult<Box<dyn Comparator>> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| VoxFiltError::UnknownComparator {
                name: name.to_string(),
            })?;
        Ok(factory())
    }

    pub fn create_with(&self, name: &str, params: Params) -> VoxFiltResult<Box<dyn Comparator>> {
        let mut cmp = self.create(name)?;
        cmp.set_params(params);
        Ok(cmp)
    }

    /// Human-readable catalogue of every comparator and its parameters.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        for name in self.names() {
            let cmp = self.factories[name]();
            let _ = writeln!(out, "{name} : {}", cmp.description());
            for spec in cmp.param_types().iter() {
                let _ = writeln!(out, "\t{}({}) - {}", spec.name, spec.kind, spec.description);
            }
        }
        out
    }
}

static GLOBAL: OnceLock<ComparatorRegistry> = OnceLock::new();

/// Populates the process-wide registry with the built-in comparators.
///
/// Call once at startup; further calls are no-ops.
pub fn register_builtin_comparators() {
    GLOBAL.get_or_init(ComparatorRegistry::with_builtins);
}

fn global() -> VoxFiltResult<&'static ComparatorRegistry> {
    GLOBAL.get().ok_or_else(|| {
        VoxFiltError::invalid_argument("comparator registry is not initialized")
    })
}

/// Names of the registered comparators, empty before registration.
pub fn comparator_names() -> Vec<&'static str> {
    GLOBAL.get().map(ComparatorRegistry::names).unwrap_or_default()
}

/// Creates a comparator from the process-wide registry.
pub fn create_comparator(name: &str) -> VoxFiltResult<Box<dyn Comparator>> {
    global()?.create(name)
}

/// Creates and configures a comparator from the process-wide registry.
pub fn create_comparator_with(name: &str, params: Params) -> VoxFiltResult<Box<dyn Comparator>> {
    global()?.create_with(name, params)
}

/// Catalogue of the process-wide registry.
pub fn dump_comparators() -> String {
    GLOBAL.get().map(ComparatorRegistry::dump).unwrap_or_default()
}

/// Resolves `name`, configures it with `params` and scores `image` against
/// `with`.
pub fn compare(
    name: &str,
    image: Option<&Volume>,
    with: Option<&Volume>,
    params: &Params,
) -> VoxFiltResult<f32> {
    let _span = trace_span!("compare", comparator = name).entered();
    let cmp = create_comparator_with(name, params.clone())?;
    let (image, with) = super::validate_input_args(image, with)?;
    cmp.evaluate(image, with)
}
