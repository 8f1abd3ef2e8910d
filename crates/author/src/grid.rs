use glam::Vec3;

/// A square, flat grid of cells centered on the origin at `y = 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpec {
    /// Cells per side.
    pub size: u32,
    /// Spacing between cell centers, equal to the cube edge length.
    pub cell_size: f32,
}

/// One cell of the generated grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridCell {
    pub x: u32,
    pub z: u32,
    pub position: Vec3,
    /// On the outer ring of the grid.
    pub border: bool,
}

impl GridSpec {
    /// # Panics
    /// If `cell_size` is not a positive finite number.
    pub fn new(size: u32, cell_size: f32) -> Self {
        assert!(
            cell_size.is_finite() && cell_size > 0.0,
            "cell_size must be positive and finite"
        );
        Self { size, cell_size }
    }

    pub fn cell_count(&self) -> usize {
        (self.size as usize) * (self.size as usize)
    }

    /// Cells on the outer ring: `4G - 4` for `G > 1`.
    pub fn border_count(&self) -> usize {
        match self.size {
            0 => 0,
            1 => 1,
            g => 4 * g as usize - 4,
        }
    }

    pub fn is_border(&self, x: u32, z: u32) -> bool {
        let last = self.size.saturating_sub(1);
        x == 0 || z == 0 || x == last || z == last
    }

    /// World position of cell `(x, z)`.
    pub fn position(&self, x: u32, z: u32) -> Vec3 {
        let center = (self.size as f32 - 1.0) / 2.0;
        Vec3::new(
            (x as f32 - center) * self.cell_size,
            0.0,
            (z as f32 - center) * self.cell_size,
        )
    }

    /// Every cell, row by row along X then Z.
    pub fn cells(&self) -> impl Iterator<Item = GridCell> + '_ {
        (0..self.size).flat_map(move |x| {
            (0..self.size).map(move |z| GridCell {
                x,
                z,
                position: self.position(x, z),
                border: self.is_border(x, z),
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_count_is_square() {
        for g in 0..20 {
            let spec = GridSpec::new(g, 1.5);
            assert_eq!(spec.cells().count(), (g * g) as usize);
            assert_eq!(spec.cell_count(), (g * g) as usize);
        }
    }

    #[test]
    fn border_ring_is_4g_minus_4() {
        for g in 2..20 {
            let spec = GridSpec::new(g, 1.5);
            let borders = spec.cells().filter(|c| c.border).count();
            assert_eq!(borders, (4 * g - 4) as usize, "g = {g}");
            assert_eq!(spec.border_count(), borders);
        }
    }

    #[test]
    fn single_cell_is_border() {
        let spec = GridSpec::new(1, 1.0);
        let cells: Vec<_> = spec.cells().collect();
        assert_eq!(cells.len(), 1);
        assert!(cells[0].border);
        assert_eq!(cells[0].position, Vec3::ZERO);
    }

    #[test]
    fn grid_is_centered_and_flat() {
        let spec = GridSpec::new(16, 1.5);
        let sum: Vec3 = spec.cells().map(|c| c.position).sum();
        assert!(sum.length() < 1e-3);
        assert!(spec.cells().all(|c| c.position.y == 0.0));
        assert_eq!(spec.position(0, 0), Vec3::new(-11.25, 0.0, -11.25));
        assert_eq!(spec.position(15, 15), Vec3::new(11.25, 0.0, 11.25));
    }

    #[test]
    fn neighbours_are_one_cell_apart() {
        let spec = GridSpec::new(4, 2.0);
        let d = spec.position(1, 2) - spec.position(0, 2);
        assert_eq!(d, Vec3::new(2.0, 0.0, 0.0));
    }
}
