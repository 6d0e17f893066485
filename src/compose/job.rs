use std::io::{Read, Write};

use anyhow::Context;

use crate::{
    bytecode::block::BytecodeCodec,
    compose::importer::{Composer, ImportOpts},
    document::codec::DocumentCodec,
    foundation::error::{WeaveError, WeaveResult},
    foundation::math::Fnv1a64,
    storage::cache::ImportCache,
    storage::store::DocumentStore,
};

/// One store-driven import: read host and donor, import, write the result.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ImportJob {
    /// Store id of the host document.
    pub host: String,
    /// Store id of the donor document.
    pub donor: String,
    /// Store id the composed document is written to.
    pub output: String,
    /// Class to bind the imported sprite to.
    #[serde(default)]
    pub class_name: Option<String>,
    /// Import options.
    #[serde(default)]
    pub opts: ImportOpts,
}

/// What [`run_import_job`] did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JobOutcome {
    /// Cache key derived from the inputs.
    pub cache_key: String,
    /// Output came from the cache.
    pub cache_hit: bool,
    /// Bytes written to the output.
    pub bytes_written: usize,
    /// Dictionary key of the imported sprite; `None` on a cache hit.
    pub sprite_key: Option<String>,
}

/// Run `job` against `store`, reusing and filling `cache`.
///
/// The cache key covers both input documents, the class name and the options, so a hit is
/// byte-identical to what a fresh run would produce.
#[tracing::instrument(skip_all, fields(host = %job.host, donor = %job.donor, output = %job.output))]
pub fn run_import_job(
    job: &ImportJob,
    store: &mut dyn DocumentStore,
    cache: &mut dyn ImportCache,
    documents: &dyn DocumentCodec,
    bytecode: &dyn BytecodeCodec,
) -> WeaveResult<JobOutcome> {
    let host_bytes = read_all(store, &job.host)?;
    let donor_bytes = read_all(store, &job.donor)?;
    let cache_key = cache_key(job, &host_bytes, &donor_bytes)?;

    if cache.has(&cache_key)
        && let Some(bytes) = cache.get(&cache_key)?
    {
        tracing::debug!(key = %cache_key, "import cache hit");
        write_output(store, &job.output, &bytes)?;
        return Ok(JobOutcome {
            cache_key,
            cache_hit: true,
            bytes_written: bytes.len(),
            sprite_key: None,
        });
    }

    let mut host = documents
        .decode(&job.host, &host_bytes)
        .map_err(|e| e.in_document(&job.host))?;
    let donor = documents
        .decode(&job.donor, &donor_bytes)
        .map_err(|e| e.in_document(&job.donor))?;

    let imported = Composer::new(bytecode)
        .with_opts(job.opts.clone())
        .import_sprite(&mut host, &donor, job.class_name.as_deref())?;

    let bytes = documents
        .encode(&host)
        .map_err(|e| e.in_document(&job.host))?;
    cache.put(&cache_key, &bytes)?;
    write_output(store, &job.output, &bytes)?;

    Ok(JobOutcome {
        cache_key,
        cache_hit: false,
        bytes_written: bytes.len(),
        sprite_key: Some(imported.key),
    })
}

fn read_all(store: &dyn DocumentStore, id: &str) -> WeaveResult<Vec<u8>> {
    let mut bytes = Vec::new();
    store
        .open_input(id)?
        .read_to_end(&mut bytes)
        .with_context(|| format!("read document '{id}'"))?;
    Ok(bytes)
}

fn write_output(store: &mut dyn DocumentStore, id: &str, bytes: &[u8]) -> WeaveResult<()> {
    {
        let mut out = store.open_output(id)?;
        out.write_all(bytes)
            .and_then(|()| out.flush())
            .with_context(|| format!("write document '{id}'"))?;
    }
    store.commit(id)
}

fn cache_key(job: &ImportJob, host: &[u8], donor: &[u8]) -> WeaveResult<String> {
    let opts = serde_json::to_string(&job.opts)
        .map_err(|e| WeaveError::internal("job.opts", format!("serialize import options: {e}")))?;
    let mut h = Fnv1a64::new_default();
    for doc in [host, donor] {
        h.write_bytes(&(doc.len() as u64).to_le_bytes());
        h.write_bytes(doc);
    }
    h.write_opt_str(job.class_name.as_deref());
    h.write_str(&opts);
    Ok(format!("{:016x}", h.finish()))
}

#[cfg(test)]
#[path = "../../tests/unit/compose/job.rs"]
mod tests;
