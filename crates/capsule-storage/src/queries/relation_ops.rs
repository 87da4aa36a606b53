//! Evolution relation appends and reads.

use chrono::Utc;
use rusqlite::{params, Connection};

use capsule_core::errors::CapsuleResult;
use capsule_core::models::{EvolutionRelation, NewRelation, RelationKind};

use super::provenance_ops::{require_registered, touch};
use super::{corrupt, format_ts, parse_json, parse_ts};
use crate::to_storage_err;

/// Append one relation event. Only the source capsule must be registered.
pub fn append_relation(conn: &Connection, input: &NewRelation) -> CapsuleResult<EvolutionRelation> {
    require_registered(conn, &input.capsule_id)?;
    let now = Utc::now();
    let metadata = serde_json::to_string(&input.metadata)?;

    conn.execute(
        "INSERT INTO evolution_relations
             (capsule_id, related_capsule_id, relation_type, strength, metadata, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            input.capsule_id,
            input.related_capsule_id,
            input.relation_type.as_str(),
            input.strength,
            metadata,
            format_ts(&now),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    touch(conn, &input.capsule_id, None, None, &now)?;

    Ok(EvolutionRelation {
        capsule_id: input.capsule_id.clone(),
        related_capsule_id: input.related_capsule_id.clone(),
        relation_type: input.relation_type,
        strength: input.strength,
        timestamp: now,
        metadata: input.metadata.clone(),
    })
}

/// Outgoing relations of `capsule_id` in append order.
pub fn load_outgoing(conn: &Connection, capsule_id: &str) -> CapsuleResult<Vec<EvolutionRelation>> {
    let mut stmt = conn
        .prepare(
            "SELECT capsule_id, related_capsule_id, relation_type, strength, metadata, created_at
             FROM evolution_relations WHERE capsule_id = ?1 ORDER BY id ASC",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![capsule_id], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, f64>(3)?,
                row.get::<_, String>(4)?,
                row.get::<_, String>(5)?,
            ))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut relations = Vec::new();
    for row in rows {
        let (source, target, kind, strength, metadata, created_at) =
            row.map_err(|e| to_storage_err(e.to_string()))?;
        let relation_type = RelationKind::from_str_name(&kind)
            .ok_or_else(|| corrupt(format!("unknown relation type {kind:?}")))?;
        relations.push(EvolutionRelation {
            capsule_id: source,
            related_capsule_id: target,
            relation_type,
            strength,
            timestamp: parse_ts(&created_at)?,
            metadata: parse_json("evolution_relations.metadata", &metadata)?,
        });
    }
    Ok(relations)
}
