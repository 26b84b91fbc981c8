#[cfg(test)]
#[path = "grid_test.rs"]
mod grid_test;

use crate::config::ViewerConfig;
use crate::model::{GridPos, GridSize, Point, tile_image_name};

/// One grid cell and its backing image.
#[derive(Debug, Clone)]
pub struct Tile<H> {
    pub grid_position: GridPos,
    pub name: String,
    pub loaded: bool,
    /// Set while a draw is waiting on the image. At most one per tile.
    pub draw_pending: bool,
    pub image: H,
}

impl<H> Tile<H> {
    pub fn world_origin(&self, tile_size: f64) -> Point {
        Point::new(
            self.grid_position.x as f64 * tile_size,
            self.grid_position.y as f64 * tile_size,
        )
    }
}

/// Fixed `columns x rows` tile store, row-major.
#[derive(Debug)]
pub struct Grid<H> {
    size: GridSize,
    tile_size: f64,
    tiles: Vec<Tile<H>>,
}

impl<H> Grid<H> {
    /// Builds every tile and asks `load` to begin fetching its image.
    pub fn new(cfg: &ViewerConfig, mut load: impl FnMut(GridPos, &str) -> H) -> Self {
        let size = cfg.grid_size();
        let mut tiles = Vec::with_capacity(size.cell_count());
        for (y, row) in cfg.rows.iter().enumerate() {
            for (x, column) in cfg.columns.iter().enumerate() {
                let grid_position = GridPos::new(x as u32, y as u32);
                let name = tile_image_name(&cfg.tile_template, column, row);
                let image = load(grid_position, &name);
                tiles.push(Tile {
                    grid_position,
                    name,
                    loaded: false,
                    draw_pending: false,
                    image,
                });
            }
        }
        Self {
            size,
            tile_size: cfg.tile_size,
            tiles,
        }
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    pub fn tile_size(&self) -> f64 {
        self.tile_size
    }

    #[cfg(test)]
    pub fn tiles(&self) -> &[Tile<H>] {
        &self.tiles
    }

    fn index(&self, x: i64, y: i64) -> Option<usize> {
        if !self.size.contains(x, y) {
            return None;
        }
        Some(y as usize * self.size.columns as usize + x as usize)
    }

    /// Out-of-range coordinates yield `None`, never a panic.
    pub fn get(&self, x: i64, y: i64) -> Option<&Tile<H>> {
        self.index(x, y).map(|i| &self.tiles[i])
    }

    fn get_mut(&mut self, pos: GridPos) -> Option<&mut Tile<H>> {
        self.index(pos.x as i64, pos.y as i64)
            .map(|i| &mut self.tiles[i])
    }

    /// Records a finished load. Returns true when a draw was waiting on it.
    pub fn mark_loaded(&mut self, pos: GridPos) -> bool {
        let Some(tile) = self.get_mut(pos) else {
            log::warn!("load completion for unknown tile ({}, {})", pos.x, pos.y);
            return false;
        };
        if tile.loaded {
            return false;
        }
        tile.loaded = true;
        log::debug!("tile {} loaded", tile.name);
        std::mem::take(&mut tile.draw_pending)
    }

    /// Registers a draw for when the tile's image arrives.
    /// Returns false if one is already registered or the tile is loaded.
    pub fn request_draw_on_load(&mut self, pos: GridPos) -> bool {
        match self.get_mut(pos) {
            Some(tile) if !tile.loaded && !tile.draw_pending => {
                tile.draw_pending = true;
                true
            }
            _ => false,
        }
    }
}
