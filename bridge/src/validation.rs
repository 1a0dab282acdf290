//! WASM module validation: ABI compatibility checks.
//!
//! Validates that a compiled generator module can be driven by the bridge
//! before it is instantiated. Checks:
//!
//! 1. `memory` export present
//! 2. A generation entry point (`generate`, or `gen`) taking and returning nothing
//! 3. Every import is a known bridge function from the import module, with
//!    the expected signature
//! 4. Field accessors come in complete `get<Name>` / `set<Name>` pairs of
//!    matching numeric type, never `f32` for an integer field
//!
//! The result is a [`ModuleAbi`] describing what the module exports.

use std::collections::BTreeMap;

use masm_hostapi::{Field, FieldKind};
use wasmtime::{ExternType, FuncType, Module, ValType};

use crate::error::BridgeError;

/// A numeric wasm value type usable at the bridge boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumType {
    I32,
    I64,
    F32,
    F64,
}

impl NumType {
    pub fn of(vt: &ValType) -> Option<Self> {
        match vt {
            ValType::I32 => Some(NumType::I32),
            ValType::I64 => Some(NumType::I64),
            ValType::F32 => Some(NumType::F32),
            ValType::F64 => Some(NumType::F64),
            _ => None,
        }
    }
}

use NumType::{F64, I32};

/// Imports the bridge provides: (name, params, results).
pub const BRIDGE_IMPORTS: &[(&str, &[NumType], &[NumType])] = &[
    ("log", &[I32, I32], &[]),
    ("consoleDebug", &[I32, I32], &[]),
    ("setFillStyle", &[I32, I32], &[]),
    ("setStrokeStyle", &[I32, I32], &[]),
    ("fillRect", &[F64, F64, F64, F64], &[]),
    ("fillAll", &[], &[]),
    ("drawLine", &[F64, F64, F64, F64], &[]),
    ("resizeCanvas", &[I32, I32], &[]),
];

/// Accepted names for the generation entry point, in order of preference.
pub const ENTRY_POINTS: &[&str] = &["generate", "gen"];

/// What a validated module exports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleAbi {
    /// Export name of the generation entry point.
    pub entry_point: &'static str,
    /// Exported fields and the numeric type their accessors use.
    pub fields: BTreeMap<Field, NumType>,
}

/// Validate that a module meets the bridge ABI.
pub fn validate_module(module: &Module, import_module: &str) -> Result<ModuleAbi, BridgeError> {
    validate_imports(module, import_module)?;
    let entry_point = validate_exports(module)?;
    let fields = validate_fields(module)?;
    Ok(ModuleAbi { entry_point, fields })
}

fn export_func(module: &Module, name: &str) -> Result<Option<FuncType>, BridgeError> {
    match module.get_export(name) {
        None => Ok(None),
        Some(ExternType::Func(ft)) => Ok(Some(ft)),
        Some(_) => Err(BridgeError::Validation(format!(
            "export '{}' must be a function",
            name
        ))),
    }
}

fn signature(ft: &FuncType) -> Option<(Vec<NumType>, Vec<NumType>)> {
    let params = ft.params().map(|p| NumType::of(&p)).collect::<Option<Vec<_>>>()?;
    let results = ft.results().map(|r| NumType::of(&r)).collect::<Option<Vec<_>>>()?;
    Some((params, results))
}

/// Check the memory export and find the entry point.
fn validate_exports(module: &Module) -> Result<&'static str, BridgeError> {
    let has_memory = matches!(module.get_export("memory"), Some(ExternType::Memory(_)));
    if !has_memory {
        return Err(BridgeError::MissingExport("memory".into()));
    }

    for &name in ENTRY_POINTS {
        if let Some(ft) = export_func(module, name)? {
            if ft.params().len() != 0 || ft.results().len() != 0 {
                return Err(BridgeError::Validation(format!(
                    "entry point '{}' must take no params and return nothing",
                    name
                )));
            }
            return Ok(name);
        }
    }
    Err(BridgeError::MissingExport(ENTRY_POINTS[0].into()))
}

/// Check that every import is a bridge function with the right signature.
fn validate_imports(module: &Module, import_module: &str) -> Result<(), BridgeError> {
    for import in module.imports() {
        let module_name = import.module();
        let name = import.name();

        if module_name != import_module {
            return Err(BridgeError::Validation(format!(
                "import from unknown module '{}' (only '{}' allowed): {}",
                module_name, import_module, name
            )));
        }

        let ft = match import.ty() {
            ExternType::Func(ft) => ft,
            _ => {
                return Err(BridgeError::Validation(format!(
                    "non-function import not allowed: {}::{}",
                    module_name, name
                )));
            }
        };

        let &(_, params, results) = BRIDGE_IMPORTS
            .iter()
            .find(|(known, _, _)| *known == name)
            .ok_or_else(|| {
                BridgeError::Validation(format!("unknown import: {}::{}", module_name, name))
            })?;

        match signature(&ft) {
            Some((p, r)) if p == params && r == results => {}
            _ => {
                return Err(BridgeError::Validation(format!(
                    "import '{}' has wrong signature: expected {:?} -> {:?}",
                    name, params, results
                )));
            }
        }
    }
    Ok(())
}

/// Collect accessor pairs, rejecting half pairs and mismatched types.
fn validate_fields(module: &Module) -> Result<BTreeMap<Field, NumType>, BridgeError> {
    let mut fields = BTreeMap::new();
    for field in Field::ALL {
        let getter = export_func(module, field.getter())?;
        let setter = export_func(module, field.setter())?;
        let (getter, setter) = match (getter, setter) {
            (None, None) => continue,
            (Some(g), Some(s)) => (g, s),
            _ => {
                return Err(BridgeError::Validation(format!(
                    "field '{}' needs both '{}' and '{}'",
                    field,
                    field.getter(),
                    field.setter()
                )));
            }
        };

        let get_ty = match signature(&getter) {
            Some((p, r)) if p.is_empty() && r.len() == 1 => r[0],
            _ => {
                return Err(BridgeError::Validation(format!(
                    "'{}' must take no params and return one number",
                    field.getter()
                )));
            }
        };
        // f32 is exact only up to 2^24, well short of a clock seed
        if field.kind() == FieldKind::Int && get_ty == NumType::F32 {
            return Err(BridgeError::Validation(format!(
                "integer field '{}' cannot use f32 accessors",
                field
            )));
        }
        match signature(&setter) {
            Some((p, r)) if p == [get_ty] && r.is_empty() => {}
            _ => {
                return Err(BridgeError::Validation(format!(
                    "'{}' must take one {:?} and return nothing",
                    field.setter(),
                    get_ty
                )));
            }
        }
        fields.insert(field, get_ty);
    }
    Ok(fields)
}
