// src/domain.rs
//
// Regras de negócio puras (sem banco, sem HTTP). Os services carregam os dados
// pelos repositórios e delegam as decisões para cá.

pub mod assistant;
pub mod availability;
pub mod calendar;
pub mod finance;
pub mod links;
pub mod sire;
