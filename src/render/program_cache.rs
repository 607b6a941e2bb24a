use super::{
    gl_program::LinkedProgram,
    opengl::GraphicsContext,
    shader::{ShaderStage, StageId},
};
use crate::config::CacheConfig;
use std::collections::{hash_map::Entry, HashMap};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LinkError {
    #[error("failed to create program object: {0}")]
    CreateProgram(String),
    #[error(
        "failed to link program from vertex stage {vertex} and pixel stage {pixel}: {}",
        describe_log(.log)
    )]
    Link {
        vertex: StageId,
        pixel: StageId,
        log: String,
    },
}

fn describe_log(log: &str) -> &str {
    let log = log.trim();
    if log.is_empty() {
        "driver supplied no info log"
    } else {
        log
    }
}

/// Ordered (vertex, pixel) identity pair. Kept as a tuple so distinct pairs
/// never share a key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StagePairKey {
    pub vertex: StageId,
    pub pixel: StageId,
}

impl StagePairKey {
    pub fn new(vertex: StageId, pixel: StageId) -> StagePairKey {
        StagePairKey { vertex, pixel }
    }
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub link_failures: u64,
}

/// Links each distinct (vertex, pixel) stage pair once and owns the resulting
/// programs. Must only be used on the thread owning the GL context.
///
/// A miss leaves the newly linked program active on the context. With
/// [`CacheConfig::unbind_after_link`] no program is active afterwards.
pub struct ProgramLinkCache<'gl, C: GraphicsContext + ?Sized> {
    gl: &'gl C,
    config: CacheConfig,
    programs: HashMap<StagePairKey, LinkedProgram<'gl, C>>,
    stats: CacheStats,
    disposed: bool,
}

impl<'gl, C: GraphicsContext + ?Sized> ProgramLinkCache<'gl, C> {
    pub fn new(gl: &'gl C) -> Self {
        Self::with_config(gl, CacheConfig::default())
    }

    pub fn with_config(gl: &'gl C, config: CacheConfig) -> Self {
        Self {
            gl,
            programs: HashMap::with_capacity(config.initial_capacity),
            config,
            stats: CacheStats::default(),
            disposed: false,
        }
    }

    pub fn get_program<V: ShaderStage, P: ShaderStage>(
        &mut self,
        vertex: &V,
        pixel: &P,
    ) -> Result<&LinkedProgram<'gl, C>, LinkError> {
        let key = StagePairKey::new(vertex.id(), pixel.id());

        match self.programs.entry(key) {
            Entry::Occupied(entry) => {
                self.stats.hits += 1;
                Ok(entry.into_mut())
            }
            Entry::Vacant(entry) => {
                self.stats.misses += 1;
                log::debug!(
                    "Linking program for vertex stage {} and pixel stage {}",
                    key.vertex,
                    key.pixel
                );

                let program = link(self.gl, &self.config, vertex, pixel).map_err(|error| {
                    self.stats.link_failures += 1;
                    log::error!("{}", error);
                    error
                })?;

                self.disposed = false;
                Ok(entry.insert(program))
            }
        }
    }

    pub fn contains<V: ShaderStage, P: ShaderStage>(&self, vertex: &V, pixel: &P) -> bool {
        self.programs
            .contains_key(&StagePairKey::new(vertex.id(), pixel.id()))
    }

    pub fn len(&self) -> usize {
        self.programs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn clear(&mut self) {
        for (_, program) in self.programs.drain() {
            program.release();
        }
    }

    pub fn dispose(&mut self) {
        if !self.disposed {
            self.clear();
            self.disposed = true;
        }
    }
}

impl<'gl, C: GraphicsContext + ?Sized> Drop for ProgramLinkCache<'gl, C> {
    fn drop(&mut self) {
        self.dispose();
    }
}

fn link<'gl, C, V, P>(
    gl: &'gl C,
    config: &CacheConfig,
    vertex: &V,
    pixel: &P,
) -> Result<LinkedProgram<'gl, C>, LinkError>
where
    C: GraphicsContext + ?Sized,
    V: ShaderStage,
    P: ShaderStage,
{
    let handle = gl.create_program().map_err(LinkError::CreateProgram)?;

    gl.attach_shader(handle, vertex.handle());
    gl.attach_shader(handle, pixel.handle());

    // Attribute bindings only take effect at link time.
    vertex.bind_attribute_locations(gl, handle);
    gl.link_program(handle);

    // Sampler assignment writes uniforms of the active program.
    gl.use_program(Some(handle));

    if !gl.get_program_link_status(handle) {
        let log = gl.get_program_info_log(handle);

        gl.detach_shader(handle, vertex.handle());
        gl.detach_shader(handle, pixel.handle());
        gl.delete_program(handle);

        return Err(LinkError::Link {
            vertex: vertex.id(),
            pixel: pixel.id(),
            log,
        });
    }

    let program = LinkedProgram::new(gl, handle, config.warn_unbound_uniforms);
    pixel.assign_texture_units(&program);

    if config.unbind_after_link {
        gl.use_program(None);
    }

    log::debug!("Linked program {}", handle);

    Ok(program)
}
