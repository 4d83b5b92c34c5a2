/// Per-kind object counts.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct ResourceCounts {
    pub buffers: u32,
    pub vertex_arrays: u32,
    pub textures: u32,
    pub shaders: u32,
    pub programs: u32,
}

impl ResourceCounts {
    pub fn total(&self) -> u32 {
        self.buffers + self.vertex_arrays + self.textures + self.shaders + self.programs
    }

    fn saturating_sub(self, rhs: Self) -> Self {
        Self {
            buffers: self.buffers.saturating_sub(rhs.buffers),
            vertex_arrays: self.vertex_arrays.saturating_sub(rhs.vertex_arrays),
            textures: self.textures.saturating_sub(rhs.textures),
            shaders: self.shaders.saturating_sub(rhs.shaders),
            programs: self.programs.saturating_sub(rhs.programs),
        }
    }
}

/// Created/deleted counters maintained by the graphics context.
///
/// A clean shutdown leaves `created == deleted` for every kind.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct ResourceStats {
    pub created: ResourceCounts,
    pub deleted: ResourceCounts,
}

impl ResourceStats {
    /// Objects created and not yet deleted.
    pub fn live(&self) -> ResourceCounts {
        self.created.saturating_sub(self.deleted)
    }

    pub fn is_balanced(&self) -> bool {
        self.created == self.deleted
    }
}
