use crate::*;

/// Parses user-supplied coordinates, rejecting anything that is not an in-bounds integer pair.
pub fn parse_coords(raw_x: &str, raw_y: &str, size: Coord2) -> Result<Coord2> {
    let x = parse_axis(raw_x)?;
    let y = parse_axis(raw_y)?;
    check_coords(x, y, size)
}

/// Bounds check for coordinates that are already numeric.
pub fn check_coords(x: i64, y: i64, size: Coord2) -> Result<Coord2> {
    let in_bounds = |value: i64, limit: Coord| (0..i64::from(limit)).contains(&value);
    if !in_bounds(x, size.0) || !in_bounds(y, size.1) {
        log::warn!("coordinates ({}, {}) are outside {:?}", x, y, size);
        return Err(GameError::InvalidCoordinate);
    }
    Ok((x as Coord, y as Coord))
}

fn parse_axis(raw: &str) -> Result<i64> {
    raw.trim().parse::<i64>().map_err(|_| {
        log::warn!("{:?} is not a coordinate", raw);
        GameError::InvalidCoordinate
    })
}
