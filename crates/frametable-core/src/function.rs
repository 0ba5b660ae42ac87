//! Per-function GC records: safe points, roots, and callee-saved slots.

use serde::Deserialize;

/// Why the code generator placed a safe point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointKind {
    /// Backwards branch.
    Loop,
    /// Return instruction.
    Return,
    /// Call instruction.
    PreCall,
    /// Return address of a call.
    #[default]
    PostCall,
}

impl PointKind {
    pub fn as_str(self) -> &'static str {
        match self {
            PointKind::Loop => "loop",
            PointKind::Return => "return",
            PointKind::PreCall => "pre-call",
            PointKind::PostCall => "post-call",
        }
    }
}

/// Where a root lives at a safe point.
///
/// Register ids are target register numbers. Ids that do not fit in a byte
/// are representable here so the emitter can reject them with context.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RootLocation {
    /// Frame offset of the slot holding the root.
    Stack(i32),
    /// Physical register.
    Register(u32),
    /// Virtual register not yet rewritten by the register allocator.
    VirtualRegister(u32),
}

/// Front-end supplied metadata attached to a root.
///
/// The only non-null form the frame table accepts is a reference to a global
/// whose initializer is an integer; the integer is the root's address space.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstantRef {
    Null,
    Int(i64),
    Global(String),
}

impl ConstantRef {
    /// The null constant and integer zero carry no information.
    pub fn is_null_value(&self) -> bool {
        matches!(self, ConstantRef::Null | ConstantRef::Int(0))
    }
}

/// A pointer to a collector-managed object, live at a safe point.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct GcRoot {
    #[serde(flatten)]
    pub location: RootLocation,
    #[serde(default)]
    pub metadata: Option<ConstantRef>,
}

impl GcRoot {
    pub fn stack(offset: i32) -> Self {
        Self {
            location: RootLocation::Stack(offset),
            metadata: None,
        }
    }

    pub fn register(reg: u32) -> Self {
        Self {
            location: RootLocation::Register(reg),
            metadata: None,
        }
    }

    pub fn virtual_register(vreg: u32) -> Self {
        Self {
            location: RootLocation::VirtualRegister(vreg),
            metadata: None,
        }
    }

    pub fn with_metadata(mut self, metadata: ConstantRef) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn is_stack(&self) -> bool {
        matches!(self.location, RootLocation::Stack(_))
    }

    /// True only for a root already assigned to a physical register.
    pub fn is_register(&self) -> bool {
        matches!(self.location, RootLocation::Register(_))
    }
}

/// A collector-safe point in machine code.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct GcPoint {
    #[serde(default)]
    pub kind: PointKind,
    /// Symbol naming the code address of the safe point.
    pub label: String,
    #[serde(default)]
    roots: Vec<GcRoot>,
}

impl GcPoint {
    pub fn new(kind: PointKind, label: impl Into<String>) -> Self {
        Self {
            kind,
            label: label.into(),
            roots: Vec::new(),
        }
    }

    pub fn add_root(&mut self, root: GcRoot) -> &mut Self {
        self.roots.push(root);
        self
    }

    pub fn roots(&self) -> &[GcRoot] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn stack_root_count(&self) -> usize {
        self.roots.iter().filter(|r| r.is_stack()).count()
    }

    /// Roots in physical registers. Unassigned virtual registers are not counted.
    pub fn register_root_count(&self) -> usize {
        self.roots.iter().filter(|r| r.is_register()).count()
    }
}

/// A register the function saved to its frame on entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct CalleeSave {
    pub reg: u32,
    #[serde(rename = "offset")]
    pub stack_offset: i32,
}

impl CalleeSave {
    pub fn new(reg: u32, stack_offset: i32) -> Self {
        Self { reg, stack_offset }
    }
}

/// Garbage collection metadata for a single function.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct GcFunctionInfo {
    name: String,
    #[serde(default)]
    callee_saves: Vec<CalleeSave>,
    #[serde(default)]
    safe_points: Vec<GcPoint>,
}

impl GcFunctionInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            callee_saves: Vec::new(),
            safe_points: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Note the existence of a safe point.
    pub fn add_safe_point(&mut self, kind: PointKind, label: impl Into<String>) -> &mut GcPoint {
        self.safe_points.push(GcPoint::new(kind, label));
        let last = self.safe_points.len() - 1;
        &mut self.safe_points[last]
    }

    /// Find the safe point at `label`, creating a post-call one if absent.
    pub fn safe_point_mut(&mut self, label: &str) -> &mut GcPoint {
        match self.safe_points.iter().position(|p| p.label == label) {
            Some(idx) => &mut self.safe_points[idx],
            None => self.add_safe_point(PointKind::PostCall, label),
        }
    }

    pub fn safe_points(&self) -> &[GcPoint] {
        &self.safe_points
    }

    pub fn add_callee_save(&mut self, save: CalleeSave) {
        self.callee_saves.push(save);
    }

    pub fn callee_saves(&self) -> &[CalleeSave] {
        &self.callee_saves
    }

    fn roots_mut(&mut self) -> impl Iterator<Item = &mut GcRoot> {
        self.safe_points.iter_mut().flat_map(|p| p.roots.iter_mut())
    }

    /// Rewrite every root held in register `src` to register `dst`.
    pub fn rename_register(&mut self, src: u32, dst: u32) {
        for root in self.roots_mut() {
            if root.location == RootLocation::Register(src) {
                root.location = RootLocation::Register(dst);
            }
        }
    }

    /// Replace virtual-register roots with the locations the allocator picked.
    ///
    /// `assign` returns `None` for registers it knows nothing about; those
    /// roots stay virtual and the emitter will refuse them.
    pub fn assign_registers(&mut self, mut assign: impl FnMut(u32) -> Option<RootLocation>) {
        for root in self.roots_mut() {
            if let RootLocation::VirtualRegister(vreg) = root.location
                && let Some(location) = assign(vreg)
            {
                root.location = location;
            }
        }
    }
}
