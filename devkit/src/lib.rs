/*!
# ServerInfo DevKit - Stubs et utilitaires pour les tests

Bibliothèque facilitant les tests du pipeline ServerInfo avec:
- Endpoint de métriques HTTP simulé (réponses, statut et latence pilotables)
- Fixtures de snapshots conformes au format de l'exporteur
- Helpers d'attente pour tests async
*/

pub mod endpoint_stub;
pub mod fixtures;
pub mod test_utils;

pub use endpoint_stub::{MockEndpoint, MockResponse};
pub use fixtures::SnapshotBuilder;
pub use test_utils::{init_logging, wait_until};
