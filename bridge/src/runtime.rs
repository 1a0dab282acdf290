//! Module loading and the live module handle.
//!
//! [`Loader`] compiles, validates and instantiates a generator module. It is
//! consumed by `load`, so a loader produces at most one [`ModuleHandle`]:
//! the handle existing *is* the ready state. Any failure on the way is
//! fatal; there is no retry and no fallback renderer.
//!
//! [`ModuleHandle`] owns the store, the instance's memory, the generation
//! entry point and one accessor pair per exported field.

use std::collections::BTreeMap;
use std::path::Path;

use masm_hostapi::{DrawingSurface, Field, FieldKind, FieldValue, HostError, LogSink, Span};
use wasmtime::{Config, Engine, Func, Linker, Memory, Module, Store, TypedFunc, Val};

use crate::config::BridgeConfig;
use crate::error::BridgeError;
use crate::host_impl::HostState;
use crate::linker::register_host_functions;
use crate::memory::{self, Decoded};
use crate::validation::{validate_module, NumType};

/// Compiles and instantiates generator modules.
pub struct Loader {
    engine: Engine,
    config: BridgeConfig,
}

impl Loader {
    pub fn new(config: BridgeConfig) -> Result<Self, BridgeError> {
        Ok(Self {
            engine: create_engine()?,
            config,
        })
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Load from wasm bytes (binary or WAT text).
    pub fn load<S: DrawingSurface + 'static>(
        self,
        wasm_bytes: &[u8],
        surface: S,
        log_sink: Box<dyn LogSink>,
    ) -> Result<ModuleHandle<S>, BridgeError> {
        let module = Module::new(&self.engine, wasm_bytes)?;
        self.instantiate(module, surface, log_sink)
    }

    /// Load from a `.wasm` or `.wat` file path.
    pub fn load_file<S: DrawingSurface + 'static>(
        self,
        path: &Path,
        surface: S,
        log_sink: Box<dyn LogSink>,
    ) -> Result<ModuleHandle<S>, BridgeError> {
        let module = Module::from_file(&self.engine, path)?;
        self.instantiate(module, surface, log_sink)
    }

    fn instantiate<S: DrawingSurface + 'static>(
        self,
        module: Module,
        surface: S,
        log_sink: Box<dyn LogSink>,
    ) -> Result<ModuleHandle<S>, BridgeError> {
        let abi = validate_module(&module, &self.config.import_module)?;

        let mut store = Store::new(&self.engine, HostState::new(surface, log_sink, &self.config));
        store.limiter(|state| &mut state.limits);

        let mut linker = Linker::new(&self.engine);
        register_host_functions(&mut linker, &self.config.import_module)?;

        let instance = linker.instantiate(&mut store, &module)?;

        let memory = instance
            .get_memory(&mut store, "memory")
            .ok_or_else(|| BridgeError::MissingExport("memory".into()))?;
        let entry = instance.get_typed_func::<(), ()>(&mut store, abi.entry_point)?;

        let mut accessors = BTreeMap::new();
        for (&field, &num) in &abi.fields {
            let getter = instance
                .get_func(&mut store, field.getter())
                .ok_or_else(|| BridgeError::MissingExport(field.getter().into()))?;
            let setter = instance
                .get_func(&mut store, field.setter())
                .ok_or_else(|| BridgeError::MissingExport(field.setter().into()))?;
            accessors.insert(field, Accessor { getter, setter, num });
        }

        tracing::debug!(
            entry_point = abi.entry_point,
            fields = accessors.len(),
            "generator module ready"
        );

        Ok(ModuleHandle {
            store,
            memory,
            entry,
            accessors,
        })
    }
}

#[derive(Clone, Copy)]
struct Accessor {
    getter: Func,
    setter: Func,
    num: NumType,
}

/// A ready generator module.
pub struct ModuleHandle<S: 'static> {
    store: Store<HostState<S>>,
    memory: Memory,
    entry: TypedFunc<(), ()>,
    accessors: BTreeMap<Field, Accessor>,
}

impl<S: DrawingSurface + 'static> ModuleHandle<S> {
    /// Run the generation entry point to completion.
    pub fn generate(&mut self) -> Result<(), BridgeError> {
        handle_trap(self.entry.call(&mut self.store, ()))
    }

    /// Read a field through its getter.
    pub fn get(&mut self, field: Field) -> Result<FieldValue, BridgeError> {
        let acc = self.accessor(field)?;
        let mut results = [Val::I32(0)];
        handle_trap(acc.getter.call(&mut self.store, &[], &mut results))?;
        Ok(from_val(&results[0], field.kind()))
    }

    /// Write a field through its setter.
    pub fn set(&mut self, field: Field, value: FieldValue) -> Result<(), BridgeError> {
        let acc = self.accessor(field)?;
        let arg = to_val(acc.num, value)?;
        handle_trap(acc.setter.call(&mut self.store, &[arg], &mut []))
    }

    /// Exported fields, in synchronization order.
    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.accessors.keys().copied()
    }

    pub fn has_field(&self, field: Field) -> bool {
        self.accessors.contains_key(&field)
    }

    pub fn surface(&self) -> &S {
        &self.store.data().surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.store.data_mut().surface
    }

    pub fn into_surface(self) -> S {
        self.store.into_data().surface
    }

    /// Number of `log` calls the guest has made.
    pub fn log_calls(&self) -> u64 {
        self.store.data().log_calls
    }

    /// Current size of guest linear memory in bytes.
    pub fn memory_size(&self) -> usize {
        self.memory.data_size(&self.store)
    }

    /// Decode a span of guest memory on the host side.
    pub fn decode(&self, span: Span) -> Decoded {
        memory::decode_span(self.memory.data(&self.store), span)
    }

    fn accessor(&self, field: Field) -> Result<Accessor, BridgeError> {
        self.accessors
            .get(&field)
            .copied()
            .ok_or(BridgeError::FieldNotExported(field))
    }
}

/// Largest magnitude an `f64` accessor holds exactly.
const F64_EXACT: i64 = 1 << 53;

/// Encode a field value for an accessor of type `num`.
///
/// Integers wrap to the accessor width; booleans are `0` / `1`. Float
/// accessors refuse values they cannot hold exactly.
fn to_val(num: NumType, value: FieldValue) -> Result<Val, BridgeError> {
    let v = value.as_int();
    let val = match num {
        NumType::I32 => Val::I32(v as i32),
        NumType::I64 => Val::I64(v),
        // validation only admits f32 for bool fields
        NumType::F32 => Val::F32((v as f32).to_bits()),
        NumType::F64 if v.unsigned_abs() > F64_EXACT as u64 => {
            return Err(HostError::invalid_value(format!("{} is not exact as f64", v)).into());
        }
        NumType::F64 => Val::F64((v as f64).to_bits()),
    };
    Ok(val)
}

fn from_val(val: &Val, kind: FieldKind) -> FieldValue {
    let raw = match val {
        Val::I32(v) => *v as i64,
        Val::I64(v) => *v,
        Val::F32(bits) => f32::from_bits(*bits) as i64,
        Val::F64(bits) => f64::from_bits(*bits) as i64,
        _ => 0,
    };
    FieldValue::Int(raw).coerce(kind)
}

/// Create a Wasmtime engine for a single-threaded, non-yielding guest.
fn create_engine() -> Result<Engine, BridgeError> {
    let mut wasm_config = Config::new();
    wasm_config.wasm_threads(false);
    wasm_config.wasm_multi_memory(false);
    Ok(Engine::new(&wasm_config)?)
}

/// Convert a failed guest call into `BridgeError::GuestTrapped`.
fn handle_trap<R>(result: Result<R, anyhow::Error>) -> Result<R, BridgeError> {
    result.map_err(|e| BridgeError::GuestTrapped(format!("{:#}", e)))
}
