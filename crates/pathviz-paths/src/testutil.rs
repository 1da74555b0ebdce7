use pathviz_core::{Grid, Point};

/// Build a grid from rows of text: `#` wall, `S` start, `E` end, anything
/// else empty.
pub(crate) fn grid_from(rows: &[&str]) -> Grid {
    let mut g = Grid::new(rows.len() as i32, rows[0].len() as i32).unwrap();
    g.reset_all();
    for (r, line) in rows.iter().enumerate() {
        for (c, ch) in line.chars().enumerate() {
            let p = Point::new(r as i32, c as i32);
            match ch {
                '#' => {
                    g.set_wall(p);
                }
                'S' => g.move_start(p).unwrap(),
                'E' => g.move_end(p).unwrap(),
                _ => {}
            }
        }
    }
    g
}

pub(crate) fn pts(v: &[(i32, i32)]) -> Vec<Point> {
    v.iter().map(|&(r, c)| Point::new(r, c)).collect()
}
