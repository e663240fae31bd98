mod in_mem;

use std::boxed::Box;

use crate::config::AppDataStoreCfg;

pub use in_mem::{
    AbstInMemoryDStore, AppInMemDeleteInfo, AppInMemFetchKeys, AppInMemFetchedData,
    AppInMemFetchedSingleRow, AppInMemFetchedSingleTable, AppInMemUpdateData, AppInMemoryDStore,
};

pub fn build_context(cfg: &[AppDataStoreCfg]) -> Option<Box<dyn AbstInMemoryDStore>> {
    let mut inmem = None;
    for c in cfg {
        match c {
            AppDataStoreCfg::InMemory(d) => {
                let item: Box<dyn AbstInMemoryDStore> = Box::new(AppInMemoryDStore::new(d));
                inmem = Some(item);
            }
        }
    }
    inmem
}
