use core_config::RemoteConfig;
use snafu::ResultExt;

use crate::error::{self as qc_error, QcResult};

/// Public web instance root, as published by the remote configuration.
const WI_URL_KEY: &str = "WI_URL";

/// Builds detail-page URLs for hyperlinked HTML cells.
pub(crate) struct AlleleLinks<'a> {
    base: &'a str,
}

impl<'a> AlleleLinks<'a> {
    pub(crate) fn from_config(config: &'a RemoteConfig) -> QcResult<Self> {
        let base = config
            .require(WI_URL_KEY)
            .context(qc_error::ConfigSnafu)?;
        Ok(Self { base })
    }

    pub(crate) fn allele_url(&self, allele_key: &str) -> String {
        format!("{}searches/allele.cgi?id={allele_key}", self.base)
    }

    pub(crate) fn accession_url(&self, accid: &str) -> String {
        format!("{}searches/accession_report.cgi?id={accid}", self.base)
    }
}
