use std::io::{self, Write};
use log::info;
use crossterm::{
    cursor::MoveTo,
    execute,
};

use crate::constants::{CELL_HEIGHT, CELL_WIDTH};

// --- ScreenBuffer for headless rendering ---
pub struct ScreenBuffer {
    pub buffer: Vec<Vec<char>>,
    pub width: u16,
    pub height: u16,
    pub cursor_x: u16,
    pub cursor_y: u16,
}

impl ScreenBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        ScreenBuffer {
            buffer: vec![vec![' '; width as usize]; height as usize],
            width,
            height,
            cursor_x: 0,
            cursor_y: 0,
        }
    }

    pub fn move_to(&mut self, x: u16, y: u16) {
        self.cursor_x = x;
        self.cursor_y = y;
    }

    pub fn write_char(&mut self, c: char) {
        if self.cursor_y < self.height && self.cursor_x < self.width {
            self.buffer[self.cursor_y as usize][self.cursor_x as usize] = c;
        }
    }

    pub fn write_str(&mut self, s: &str) {
        for c in s.chars() {
            self.write_char(c);
            self.cursor_x = self.cursor_x.saturating_add(1);
        }
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.clear();
    }

    pub fn clear(&mut self) {
        self.buffer = vec![vec![' '; self.width as usize]; self.height as usize];
        self.cursor_x = 0;
        self.cursor_y = 0;
    }

    pub fn lines(&self) -> Vec<String> {
        self.buffer.iter().map(|row| row.iter().collect()).collect()
    }

    pub fn print_to_log(&self, frame: u64) {
        info!("--- Screen Buffer (frame {}) ---", frame);
        for line in self.lines() {
            info!("{}", line);
        }
        info!("---------------------");
    }
}

impl Write for ScreenBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let s = String::from_utf8_lossy(buf);
        self.write_str(&s);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// --- OutputTarget enum to handle stdout or ScreenBuffer ---
pub enum OutputTarget {
    Stdout(io::Stdout),
    ScreenBuffer(ScreenBuffer),
}

impl OutputTarget {
    pub fn execute_move_to(&mut self, command: MoveTo) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => execute!(s, command),
            OutputTarget::ScreenBuffer(sb) => {
                sb.move_to(command.0, command.1);
                Ok(())
            },
        }
    }

    pub fn execute_other_command(&mut self, command: impl crossterm::Command) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => execute!(s, command),
            OutputTarget::ScreenBuffer(_) => Ok(()), // Ignore in debug mode
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            OutputTarget::Stdout(s) => s.write(buf),
            OutputTarget::ScreenBuffer(sb) => sb.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => s.flush(),
            OutputTarget::ScreenBuffer(sb) => sb.flush(),
        }
    }
}

/// Cell containing the virtual-pixel point, if it is on the grid.
fn cell_at(x: f64, y: f64, width: u16, height: u16) -> Option<(u16, u16)> {
    if !(x >= 0.0 && y >= 0.0) {
        return None;
    }
    let col = (x / CELL_WIDTH).floor();
    let row = (y / CELL_HEIGHT).floor();
    if col < width as f64 && row < height as f64 {
        Some((col as u16, row as u16))
    } else {
        None
    }
}

fn cell_center(col: u16, row: u16) -> (f64, f64) {
    ((col as f64 + 0.5) * CELL_WIDTH, (row as f64 + 0.5) * CELL_HEIGHT)
}

/// Even-odd test.
fn point_in_polygon(x: f64, y: f64, points: &[(f64, f64)]) -> bool {
    let mut inside = false;
    let mut j = points.len().wrapping_sub(1);
    for i in 0..points.len() {
        let (xi, yi) = points[i];
        let (xj, yj) = points[j];
        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

// --- GameGrid: one frame of terminal cells, addressed in virtual pixels ---
pub struct GameGrid {
    pub grid: Vec<Vec<char>>,
    pub width: u16,
    pub height: u16,
}

impl GameGrid {
    pub fn new(width: u16, height: u16) -> Self {
        GameGrid {
            grid: vec![vec![' '; width as usize]; height as usize],
            width,
            height,
        }
    }

    pub fn set_char(&mut self, x: u16, y: u16, c: char) {
        if y < self.height && x < self.width {
            self.grid[y as usize][x as usize] = c;
        }
    }

    #[cfg(test)]
    pub fn char_at(&self, x: u16, y: u16) -> Option<char> {
        self.grid.get(y as usize).and_then(|row| row.get(x as usize)).copied()
    }

    pub fn clear(&mut self) {
        self.grid = vec![vec![' '; self.width as usize]; self.height as usize];
    }

    pub fn plot(&mut self, x: f64, y: f64, c: char) {
        if let Some((col, row)) = cell_at(x, y, self.width, self.height) {
            self.set_char(col, row, c);
        }
    }

    /// Writes text whose baseline sits at `y`, starting at `x`.
    pub fn put_text(&mut self, x: f64, y: f64, text: &str) {
        let Some((col, row)) = cell_at(x, (y - 1.0).max(0.0), self.width, self.height) else {
            return;
        };
        for (i, c) in text.chars().enumerate() {
            let Ok(offset) = u16::try_from(i) else { break };
            self.set_char(col.saturating_add(offset), row, c);
        }
    }

    pub fn fill_polygon(&mut self, points: &[(f64, f64)], c: char) {
        if points.is_empty() {
            return;
        }
        let (mut min_x, mut min_y) = (f64::MAX, f64::MAX);
        let (mut max_x, mut max_y) = (f64::MIN, f64::MIN);
        for &(x, y) in points {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }

        let mut filled = false;
        for (col, row) in self.cells_in_box(min_x, min_y, max_x, max_y) {
            let (cx, cy) = cell_center(col, row);
            if point_in_polygon(cx, cy, points) {
                self.set_char(col, row, c);
                filled = true;
            }
        }

        // Shapes thinner than a cell still show up at their centroid.
        if !filled {
            let n = points.len() as f64;
            let cx = points.iter().map(|p| p.0).sum::<f64>() / n;
            let cy = points.iter().map(|p| p.1).sum::<f64>() / n;
            self.plot(cx, cy, c);
        }
    }

    pub fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, c: char) {
        let mut filled = false;
        for (col, row) in self.cells_in_box(cx - radius, cy - radius, cx + radius, cy + radius) {
            let (x, y) = cell_center(col, row);
            if (x - cx).powi(2) + (y - cy).powi(2) <= radius * radius {
                self.set_char(col, row, c);
                filled = true;
            }
        }
        if !filled {
            self.plot(cx, cy, c);
        }
    }

    fn cells_in_box(&self, min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Vec<(u16, u16)> {
        if max_x < 0.0 || max_y < 0.0 || self.width == 0 || self.height == 0 {
            return Vec::new();
        }
        let first_col = (min_x.max(0.0) / CELL_WIDTH).floor() as u16;
        let first_row = (min_y.max(0.0) / CELL_HEIGHT).floor() as u16;
        let last_col = ((max_x / CELL_WIDTH).floor() as u16).min(self.width - 1);
        let last_row = ((max_y / CELL_HEIGHT).floor() as u16).min(self.height - 1);

        let mut cells = Vec::new();
        for row in first_row..=last_row {
            for col in first_col..=last_col {
                cells.push((col, row));
            }
        }
        cells
    }

    pub fn render(&self, stdout: &mut OutputTarget) -> io::Result<()> {
        for y in 0..self.height {
            stdout.execute_move_to(MoveTo(0, y))?;
            write!(stdout, "{}", self.grid[y as usize].iter().collect::<String>())?;
        }
        Ok(())
    }

    pub fn clear_screen_manual(&self, stdout: &mut OutputTarget) -> io::Result<()> {
        for y in 0..self.height {
            stdout.execute_move_to(MoveTo(0, y))?;
            write!(stdout, "{}", " ".repeat(self.width as usize))?;
        }
        stdout.execute_move_to(MoveTo(0, 0))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(grid: &GameGrid, y: u16) -> String {
        grid.grid[y as usize].iter().collect()
    }

    #[test]
    fn plot_ignores_points_off_the_grid() {
        let mut grid = GameGrid::new(4, 2);
        grid.plot(-1.0, 5.0, 'x');
        grid.plot(5.0, -1.0, 'x');
        grid.plot(40.0, 5.0, 'x');
        grid.plot(5.0, 40.0, 'x');
        assert!(grid.grid.iter().flatten().all(|&c| c == ' '));

        grid.plot(15.0, 25.0, 'x');
        assert_eq!(grid.char_at(1, 1), Some('x'));
    }

    #[test]
    fn put_text_starts_at_baseline_cell_and_clips() {
        let mut grid = GameGrid::new(6, 3);
        grid.put_text(20.0, 30.0, "Fuel: 200");
        assert_eq!(row(&grid, 1), "  Fuel");
    }

    #[test]
    fn fill_polygon_covers_cell_centres() {
        let mut grid = GameGrid::new(10, 5);
        grid.fill_polygon(&[(0.0, 0.0), (40.0, 0.0), (40.0, 40.0), (0.0, 40.0)], '#');
        assert_eq!(row(&grid, 0), "####      ");
        assert_eq!(row(&grid, 1), "####      ");
        assert_eq!(row(&grid, 2), "          ");
    }

    #[test]
    fn tiny_shapes_still_mark_a_cell() {
        let mut grid = GameGrid::new(10, 5);
        grid.fill_polygon(&[(31.0, 41.0), (33.0, 41.0), (32.0, 43.0)], '*');
        assert_eq!(grid.char_at(3, 2), Some('*'));

        grid.fill_circle(55.0, 65.0, 1.0, '.');
        assert_eq!(grid.char_at(5, 3), Some('.'));
    }

    #[test]
    fn grid_renders_into_screen_buffer() {
        let mut grid = GameGrid::new(3, 2);
        grid.set_char(1, 1, 'A');
        let mut target = OutputTarget::ScreenBuffer(ScreenBuffer::new(3, 2));
        grid.render(&mut target).unwrap();
        let OutputTarget::ScreenBuffer(sb) = target else { unreachable!() };
        assert_eq!(sb.lines(), vec!["   ".to_string(), " A ".to_string()]);
    }
}
