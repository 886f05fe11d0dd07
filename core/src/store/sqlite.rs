//! SQLite persistence.
//!
//! Two tables: a single-row `ledger_state` and one `game_result` row per
//! game, flagged archived or in progress. A save replaces both inside one
//! transaction, so readers of the file never see half a ledger.

use super::LedgerStore;
use crate::{
    error::SimResult,
    game::GameResult,
    snapshot::LedgerSnapshot,
    types::Season,
};
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::BTreeMap;

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) the database at `path`.
    pub fn open(path: &str) -> SimResult<Self> {
        let conn = Connection::open(path)?;
        // WAL mode only for real files; in-memory databases ignore it.
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> SimResult<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// Create the schema if it does not exist yet.
    pub fn migrate(&self) -> SimResult<()> {
        self.conn
            .execute_batch(include_str!("../../../migrations/001_foundation.sql"))?;
        Ok(())
    }

    /// Number of stored game rows (for tests).
    pub fn game_count(&self) -> SimResult<i64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM game_result",
            [],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    fn insert_games(
        tx:       &rusqlite::Transaction<'_>,
        games:    &[GameResult],
        archived: bool,
    ) -> SimResult<()> {
        let mut stmt = tx.prepare_cached(
            "INSERT INTO game_result (season, seq, team1, team2, score1, score2, winner, archived)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )?;
        for (seq, g) in games.iter().enumerate() {
            stmt.execute(params![
                g.season,
                seq as i64,
                g.team1,
                g.team2,
                g.score1,
                g.score2,
                g.winner,
                archived,
            ])?;
        }
        Ok(())
    }
}

impl LedgerStore for SqliteStore {
    fn name(&self) -> &'static str { "sqlite" }

    fn load(&self) -> SimResult<Option<LedgerSnapshot>> {
        let current_season: Option<Season> = self
            .conn
            .query_row(
                "SELECT current_season FROM ledger_state WHERE id = 1",
                [],
                |row| row.get(0),
            )
            .optional()?;
        let Some(current_season) = current_season else {
            return Ok(None);
        };

        let mut stmt = self.conn.prepare(
            "SELECT season, team1, team2, score1, score2, winner, archived
             FROM game_result ORDER BY season ASC, seq ASC",
        )?;
        let rows = stmt
            .query_map([], |row| {
                let game = GameResult {
                    season: row.get(0)?,
                    team1:  row.get(1)?,
                    team2:  row.get(2)?,
                    score1: row.get(3)?,
                    score2: row.get(4)?,
                    winner: row.get(5)?,
                };
                let archived: bool = row.get(6)?;
                Ok((game, archived))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut current_games = Vec::new();
        let mut archive: BTreeMap<Season, Vec<GameResult>> = BTreeMap::new();
        for (game, archived) in rows {
            if archived {
                archive.entry(game.season).or_default().push(game);
            } else {
                current_games.push(game);
            }
        }

        Ok(Some(LedgerSnapshot { current_season, current_games, archive }))
    }

    fn save(&mut self, snapshot: &LedgerSnapshot) -> SimResult<()> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM game_result", [])?;
        tx.execute(
            "INSERT OR REPLACE INTO ledger_state (id, current_season, saved_at)
             VALUES (1, ?1, ?2)",
            params![snapshot.current_season, chrono::Utc::now().to_rfc3339()],
        )?;
        for games in snapshot.archive.values() {
            Self::insert_games(&tx, games, true)?;
        }
        Self::insert_games(&tx, &snapshot.current_games, false)?;
        tx.commit()?;
        Ok(())
    }
}
