// scene/scene.rs

use hecs::{Entity, World};

use super::components::{TagComponent, TransformComponent};
use crate::renderer::Skybox;

/// Entity id written by the forward pass where no entity was drawn.
pub const NO_ENTITY_ID: u32 = 0;

pub struct Scene {
    pub world: World,
    skybox: Option<Skybox>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        Self {
            world: World::new(),
            skybox: None,
        }
    }

    /// Spawns an entity with a tag and a default transform.
    pub fn create_entity(&mut self, tag: &str) -> Entity {
        self.world
            .spawn((TagComponent::new(tag), TransformComponent::default()))
    }

    pub fn destroy_entity(&mut self, entity: Entity) {
        if self.world.despawn(entity).is_err() {
            log::warn!("Tried to destroy missing entity {:?}", entity);
        }
    }

    pub fn skybox(&self) -> Option<&Skybox> {
        self.skybox.as_ref()
    }

    pub fn set_skybox(&mut self, skybox: Skybox) {
        self.skybox = Some(skybox);
    }

    pub fn clear_skybox(&mut self) {
        self.skybox = None;
    }

    /// Id written to integer attachments for `entity`; never [`NO_ENTITY_ID`].
    ///
    /// Only the slot index is encoded, not the generation. A despawned slot is
    /// handed to the next spawned entity, so an id read from a frame rendered
    /// before that spawn resolves to the newcomer. Pick against the current frame.
    pub fn entity_id(entity: Entity) -> u32 {
        entity.id() + 1
    }

    /// Resolves a picked id back to a live entity.
    pub fn entity_from_id(&self, id: u32) -> Option<Entity> {
        if id == NO_ENTITY_ID {
            return None;
        }
        self.world
            .iter()
            .map(|entity_ref| entity_ref.entity())
            .find(|&entity| Self::entity_id(entity) == id)
    }

    pub fn tag(&self, entity: Entity) -> Option<String> {
        self.world
            .get::<&TagComponent>(entity)
            .ok()
            .map(|tag| tag.0.clone())
    }
}
