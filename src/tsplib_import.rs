use std::{
    error::Error,
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use ant_colony::graph::Point;

pub fn tsplib_import(filename: &Path) -> Result<Vec<Point>, Box<dyn Error>> {
    let file = File::open(filename)?;
    let points = parse_tsplib(BufReader::new(file))?;
    log::info!("Imported {} nodes from {:?}.", points.len(), filename);
    Ok(points)
}

/// Reads the `NODE_COORD_SECTION` of a TSPLIB file. Header keys other than `DIMENSION` are ignored.
pub fn parse_tsplib<R: BufRead>(reader: R) -> Result<Vec<Point>, Box<dyn Error>> {
    let mut dimension: Option<usize> = None;
    let mut in_coords = false;
    let mut points: Vec<Point> = vec![];

    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if !in_coords {
            if line.starts_with("NODE_COORD_SECTION") {
                in_coords = true;
            } else if let Some((key, value)) = line.split_once(':') {
                if key.trim() == "DIMENSION" {
                    dimension = Some(value.trim().parse()?);
                }
            }
            continue;
        }

        if line == "EOF" {
            break;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != 3 {
            return Err(format!("malformed coordinate line: '{}'", line).into());
        }
        points.push(Point::new(
            fields[0].parse()?,
            fields[1].parse()?,
            fields[2].parse()?,
        ));
    }

    if !in_coords {
        return Err("no NODE_COORD_SECTION found".into());
    }
    if let Some(dimension) = dimension {
        if dimension != points.len() {
            return Err(format!(
                "DIMENSION is {} but {} nodes were listed",
                dimension,
                points.len()
            )
            .into());
        }
    }

    Ok(points)
}
