use std::{path::PathBuf, sync::Arc};

use bank::{Bank, BankError, files::PdfRoot, get_bank};

use super::{
    analytics::{CounterStore, MemoryCounters},
    config::Config,
};

pub type SharedState = Arc<State>;

pub struct State {
    pub bank: Bank,
    pub config: Config,
    pub pdf_root: PdfRoot,
    pub counters: Arc<dyn CounterStore>,
    /// Built client, only when the directory existed at startup.
    pub client_dir: Option<PathBuf>,
}

impl State {
    pub fn new(config: Config) -> Result<SharedState, BankError> {
        let bank = get_bank(&config.data_dir)?;

        Ok(Self::with_counters(config, bank, Arc::new(MemoryCounters::new())))
    }

    pub fn with_counters(
        config: Config,
        bank: Bank,
        counters: Arc<dyn CounterStore>,
    ) -> SharedState {
        let pdf_root = PdfRoot::new(&config.public_dir);
        let client_dir = config
            .client_dir
            .is_dir()
            .then(|| config.client_dir.clone());

        Arc::new(Self {
            bank,
            config,
            pdf_root,
            counters,
            client_dir,
        })
    }
}
