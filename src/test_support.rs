//! Recording render surface for unit tests.

use crate::error::{Result, ViewerError};
use crate::model::{GridPos, GridSize, SurfaceSize};
use crate::render::RenderSurface;

#[derive(Clone, Debug, PartialEq)]
pub enum Op {
    Clear(String),
    Draw {
        image: u32,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
}

#[derive(Debug, Default)]
pub struct FakeSurface {
    pub size: SurfaceSize,
    pub ops: Vec<Op>,
    /// Image id whose draws fail.
    pub fail_image: Option<u32>,
}

impl FakeSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            size: SurfaceSize::new(width, height),
            ..Default::default()
        }
    }

    pub fn drawn_images(&self) -> Vec<u32> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Draw { image, .. } => Some(*image),
                Op::Clear(_) => None,
            })
            .collect()
    }

    pub fn clear_count(&self) -> usize {
        self.ops.iter().filter(|op| matches!(op, Op::Clear(_))).count()
    }
}

impl RenderSurface for FakeSurface {
    type Image = u32;

    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn set_size(&mut self, size: SurfaceSize) {
        self.size = size;
    }

    fn clear(&mut self, color: &str) {
        self.ops.push(Op::Clear(color.to_string()));
    }

    fn draw_image(&mut self, image: &u32, x: f64, y: f64, width: f64, height: f64) -> Result<()> {
        if self.fail_image == Some(*image) {
            return Err(ViewerError::Surface(format!("image {image} broken")));
        }
        self.ops.push(Op::Draw {
            image: *image,
            x,
            y,
            width,
            height,
        });
        Ok(())
    }
}

/// Loader whose image handle is the row-major cell index for `size`.
pub fn index_handle(size: GridSize) -> impl FnMut(GridPos, &str) -> u32 {
    move |pos: GridPos, _name: &str| pos.y * size.columns + pos.x
}
