//! CSV roster import and standings export.

use crate::models::{Standing, TournamentError, TournamentResult};
use serde::Deserialize;
use std::io;

#[derive(Deserialize)]
struct RosterRow {
    name: String,
}

/// Read player names from a CSV with a `name` header column.
///
/// Extra columns are ignored. A blank name or malformed row fails the whole roster.
pub fn read_roster<R: io::Read>(reader: R) -> TournamentResult<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let invalid = |e: csv::Error| TournamentError::InvalidRoster {
        line: e.position().map_or(0, |p| p.line()),
        reason: e.to_string(),
    };
    let headers = reader.headers().map_err(invalid)?.clone();

    let mut names = Vec::new();
    for record in reader.records() {
        let record = record.map_err(invalid)?;
        // Empty lines are skipped by the reader, so take the line from the record itself.
        let line = record.position().map_or(0, |p| p.line());
        let row: RosterRow = record
            .deserialize(Some(&headers))
            .map_err(|e| TournamentError::InvalidRoster {
                line,
                reason: e.to_string(),
            })?;
        if row.name.is_empty() {
            return Err(TournamentError::InvalidRoster {
                line,
                reason: "empty name".to_string(),
            });
        }
        names.push(row.name);
    }
    Ok(names)
}

/// Write ranked standings as CSV: `id,name,wins,ties,losses,matches,netscore`.
pub fn write_standings<W: io::Write>(writer: W, standings: &[Standing]) -> TournamentResult<()> {
    let export_error = |e: csv::Error| TournamentError::ExportFailed(e.to_string());
    let mut writer = csv::Writer::from_writer(writer);
    writer
        .write_record(["id", "name", "wins", "ties", "losses", "matches", "netscore"])
        .map_err(export_error)?;
    for s in standings {
        writer
            .write_record([
                s.player_id.to_string(),
                s.name.clone(),
                s.wins.to_string(),
                s.ties.to_string(),
                s.losses.to_string(),
                s.matches.to_string(),
                s.netscore.to_string(),
            ])
            .map_err(export_error)?;
    }
    writer
        .flush()
        .map_err(|e| TournamentError::ExportFailed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NetScore;

    #[test]
    fn reads_names_and_ignores_extra_columns() {
        let csv = "name,club\n Ann ,North\nBo,South\n";
        assert_eq!(read_roster(csv.as_bytes()).unwrap(), vec!["Ann", "Bo"]);
    }

    #[test]
    fn blank_name_points_at_its_line() {
        let csv = "name\nAnn\n \nCy\n";
        assert_eq!(
            read_roster(csv.as_bytes()),
            Err(TournamentError::InvalidRoster {
                line: 3,
                reason: "empty name".to_string()
            })
        );
    }

    #[test]
    fn blank_name_line_counts_skipped_empty_lines() {
        let csv = "name\n\nAnn\n\n\"\"\n";
        assert!(matches!(
            read_roster(csv.as_bytes()),
            Err(TournamentError::InvalidRoster { line: 5, .. })
        ));
    }

    #[test]
    fn missing_name_column_is_invalid() {
        let csv = "player\nAnn\n";
        assert!(matches!(
            read_roster(csv.as_bytes()),
            Err(TournamentError::InvalidRoster { .. })
        ));
    }

    #[test]
    fn writes_netscore_as_decimal() {
        let standings = vec![Standing {
            player_id: 3,
            name: "Cy".to_string(),
            wins: 0,
            ties: 1,
            losses: 0,
            matches: 1,
            netscore: NetScore::from_half_points(1),
        }];
        let mut out = Vec::new();
        write_standings(&mut out, &standings).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "id,name,wins,ties,losses,matches,netscore\n3,Cy,0,1,0,1,0.5\n"
        );
    }
}
