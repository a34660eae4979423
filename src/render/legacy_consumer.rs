//! Fallback path for models that only expose fixed-format quads.

use super::random::RandomSupplier;
use super::sink::QuadSink;
use crate::model::BakedModel;
use crate::types::Direction;

impl QuadSink<'_> {
    /// Drain a legacy model: the six cull faces first, then the un-culled list.
    ///
    /// Hidden faces are skipped before the model is asked for their quads.
    /// The random stream is reseeded for every query, so weighted models
    /// make the same choice for every face.
    pub fn accept_legacy(&mut self, model: &dyn BakedModel, random: &mut RandomSupplier<'_>) {
        let info = self.info;
        let block = info.block();

        for face in Direction::ALL {
            let cull_face = Some(face);
            if !info.should_draw_face(cull_face) {
                continue;
            }
            for baked in model.quads(block, cull_face, random.get()) {
                self.render_quad(&baked.to_quad(cull_face));
            }
        }

        for baked in model.quads(block, None, random.get()) {
            self.render_quad(&baked.to_quad(None));
        }
    }
}
