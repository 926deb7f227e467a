use std::{
    error::Error,
    fs::File,
    io::BufReader,
    io::{BufRead, BufWriter, Write},
    path::Path,
};

use ant_colony::graph::{Distances, Node, Tour};

/// Reads a tour, one node id per line. Lines that are not positive ids are skipped and `-1`
/// ends the tour, so TSPLIB `.tour` files are accepted as well. Open tours are closed.
pub fn import_tour<D>(filename: &Path, distances: &D) -> Result<Tour, Box<dyn Error>>
where
    D: Distances,
{
    let file = File::open(filename)?;
    read_tour(BufReader::new(file), distances)
}

pub fn read_tour<R, D>(reader: R, distances: &D) -> Result<Tour, Box<dyn Error>>
where
    R: BufRead,
    D: Distances,
{
    let mut ids: Vec<Node> = vec![];
    for line in reader.lines() {
        let line = line?;
        match line.trim().parse::<i64>() {
            Ok(-1) => break,
            Ok(id) if id > 0 => ids.push(Node::new(id as usize)),
            _ => continue,
        }
    }
    if ids.is_empty() {
        return Err("the tour file contains no node ids".into());
    }
    if ids.first() != ids.last() || ids.len() == 1 {
        ids.push(ids[0]);
    }
    if !check_tour(distances.n(), &ids) {
        return Err(format!("not a tour through all {} nodes", distances.n()).into());
    }
    Ok(Tour::with_cost_from(ids, distances))
}

/// A closed sequence visiting each of the nodes `1..=n` exactly once.
pub fn check_tour(n: usize, nodes: &[Node]) -> bool {
    if nodes.len() != n + 1 || nodes.first() != nodes.last() {
        return false;
    }
    let mut seen = vec![false; n];
    for node in &nodes[1..] {
        if node.id() == 0 || node.id() > n || seen[node.id() - 1] {
            return false;
        }
        seen[node.id() - 1] = true;
    }
    true
}

pub fn export_tour(filename: &Path, tour: &Tour) -> Result<(), Box<dyn Error>> {
    let file = File::create(filename)?;
    let mut writer = BufWriter::new(file);

    for node in tour {
        writeln!(writer, "{}", node.id())?;
    }
    writer.flush()?;

    log::info!("Tour of cost {} written to {:?}.", tour.cost(), filename);

    Ok(())
}
