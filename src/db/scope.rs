// src/db/scope.rs

use uuid::Uuid;

/// Prova de que o acesso ao hotel já foi verificado.
///
/// Só é criado pelo `hotel_guard` (membro do hotel, assinatura em dia) ou pelas
/// rotas públicas depois de conferir que o hotel existe e não está suspenso.
/// Os repositórios de tenant recebem `&HotelScope` e filtram `hotel_id` eles
/// mesmos, então nenhuma consulta esquece o filtro.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HotelScope(Uuid);

impl HotelScope {
    pub(crate) fn grant(hotel_id: Uuid) -> Self {
        Self(hotel_id)
    }

    pub fn hotel_id(&self) -> Uuid {
        self.0
    }
}
