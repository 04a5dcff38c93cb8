//! Typed resource records.
//!
//! One struct per backend resource, mirroring the REST serializers field by
//! field: nullable columns are `Option`s, decimal amounts keep the string
//! form they have on the wire, enumerated statuses are closed enums.
//! Server-assigned fields (ids, tracking numbers, creation timestamps) are
//! optional and skipped when serializing, so the same struct serves list,
//! detail, create and update payloads.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::core::claims::Role;

// ----------------------------------------------------------------------
// Status enums
// ----------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ColisStatut {
    #[default]
    EnAttente,
    EnTransit,
    EnLivraison,
    Livre,
    Retour,
    Annule,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeColis {
    Document,
    #[default]
    Standard,
    Fragile,
    Volumineux,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priorite {
    #[default]
    Normale,
    Express,
    Urgente,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LivreurStatut {
    #[default]
    Disponible,
    EnLivraison,
    Repos,
    Absent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeVehicule {
    Moto,
    Voiture,
    Camionnette,
    Camion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VehiculeStatut {
    #[default]
    Disponible,
    EnService,
    Maintenance,
    HorsService,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LivraisonStatut {
    #[default]
    Assignee,
    EnCours,
    Terminee,
    Echouee,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FactureStatut {
    #[default]
    EnAttente,
    Payee,
    PartiellementPayee,
    Annulee,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ModePaiement {
    Especes,
    Carte,
    MobileMoney,
    Virement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SuiviStatut {
    ColisReceptionne,
    EnPreparation,
    EnTransit,
    EnCoursLivraison,
    Livre,
    EchecLivraison,
    RetourExpediteur,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeNotification {
    Sms,
    Email,
    Push,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationStatut {
    #[default]
    EnAttente,
    Envoyee,
    Echouee,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeService {
    #[default]
    Standard,
    Express,
    Urgente,
}

// ----------------------------------------------------------------------
// Resource records
// ----------------------------------------------------------------------

/// Application account (`users/`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Utilisateur {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub telephone: Option<String>,
    pub role: Role,
    #[serde(default)]
    pub actif: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_joined: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub derniere_connexion: Option<DateTime<Utc>>,
    /// Write-only on the backend; only present when creating an account.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// Sender of a parcel (`expediteurs/`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expediteur {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub nom_complet: String,
    pub telephone: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub adresse_complete: Option<String>,
    #[serde(default)]
    pub ville: Option<String>,
    #[serde(default)]
    pub quartier: Option<String>,
    #[serde(default)]
    pub code_postal: Option<String>,
    #[serde(default)]
    pub complement_adresse: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_creation: Option<DateTime<Utc>>,
}

/// Recipient of a parcel (`destinataires/`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Destinataire {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub nom_complet: String,
    pub telephone: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub adresse_complete: Option<String>,
    pub ville: String,
    #[serde(default)]
    pub quartier: Option<String>,
    #[serde(default)]
    pub code_postal: Option<String>,
    #[serde(default)]
    pub complement_adresse: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_creation: Option<DateTime<Utc>>,
}

/// Parcel (`colis/`). Foreign keys travel as ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Colis {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Assigned by the backend at creation; never written by the client.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numero_suivi: Option<String>,
    pub expediteur: i64,
    pub destinataire: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utilisateur: Option<i64>,
    /// Kilograms, decimal string on the wire.
    #[serde(default)]
    pub poids: Option<String>,
    #[serde(default)]
    pub longueur: Option<String>,
    #[serde(default)]
    pub largeur: Option<String>,
    #[serde(default)]
    pub hauteur: Option<String>,
    pub description: String,
    #[serde(default)]
    pub valeur_declaree: Option<String>,
    #[serde(default)]
    pub type_colis: TypeColis,
    #[serde(default)]
    pub statut: ColisStatut,
    #[serde(default)]
    pub priorite: Priorite,
    #[serde(default)]
    pub assurance: bool,
    #[serde(default)]
    pub montant_assurance: Option<String>,
    #[serde(default)]
    pub instructions_speciales: Option<String>,
    #[serde(default)]
    pub frais_envoi: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_creation: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_modification: Option<DateTime<Utc>>,
    #[serde(default)]
    pub date_livraison_prevue: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_livraison_reelle: Option<DateTime<Utc>>,
}

/// Tracking event (`suivis/`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suivi {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub colis: i64,
    pub statut: SuiviStatut,
    pub description: String,
    #[serde(default)]
    pub localisation: Option<String>,
    #[serde(default)]
    pub latitude: Option<String>,
    #[serde(default)]
    pub longitude: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utilisateur: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_creation: Option<DateTime<Utc>>,
}

/// Courier profile (`livreurs/`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Livreur {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub utilisateur: i64,
    pub matricule: String,
    pub permis_conduire: String,
    pub date_validite_permis: NaiveDate,
    pub telephone_pro: String,
    #[serde(default)]
    pub statut: LivreurStatut,
    #[serde(default)]
    pub note_moyenne: Option<String>,
    #[serde(default)]
    pub nombre_livraisons: i64,
    pub zone_intervention: String,
    pub date_embauche: NaiveDate,
    #[serde(default)]
    pub actif: bool,
}

/// Fleet vehicle (`vehicules/`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub immatriculation: String,
    pub type_vehicule: TypeVehicule,
    pub marque: String,
    pub modele: String,
    pub annee: i32,
    /// Kilograms.
    pub capacite_charge: String,
    /// Cubic meters.
    pub volume_utile: String,
    #[serde(default)]
    pub statut: VehiculeStatut,
    pub date_visite_technique: NaiveDate,
    pub date_assurance: NaiveDate,
    #[serde(default)]
    pub livreur_attribue: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_creation: Option<DateTime<Utc>>,
}

/// Delivery run (`livraisons/`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Livraison {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub colis: i64,
    pub livreur: i64,
    pub vehicule: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_assignation: Option<DateTime<Utc>>,
    #[serde(default)]
    pub heure_depart: Option<DateTime<Utc>>,
    #[serde(default)]
    pub heure_arrivee: Option<DateTime<Utc>>,
    /// Kilometers.
    #[serde(default)]
    pub distance_parcourue: Option<String>,
    #[serde(default)]
    pub statut: LivraisonStatut,
    #[serde(default)]
    pub motif_echec: Option<String>,
    #[serde(default)]
    pub signature_destinataire: Option<String>,
    #[serde(default)]
    pub commentaire: Option<String>,
    #[serde(default)]
    pub latitude_livraison: Option<String>,
    #[serde(default)]
    pub longitude_livraison: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_creation: Option<DateTime<Utc>>,
}

/// Invoice (`factures/`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Facture {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numero_facture: Option<String>,
    pub colis: i64,
    #[serde(default)]
    pub montant_base: Option<String>,
    #[serde(default)]
    pub frais_distance: Option<String>,
    #[serde(default)]
    pub frais_poids: Option<String>,
    #[serde(default)]
    pub frais_assurance: Option<String>,
    #[serde(default)]
    pub frais_express: Option<String>,
    #[serde(default)]
    pub montant_total: Option<String>,
    #[serde(default)]
    pub montant_paye: Option<String>,
    #[serde(default)]
    pub statut: FactureStatut,
    #[serde(default)]
    pub mode_paiement: Option<ModePaiement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_emission: Option<DateTime<Utc>>,
    #[serde(default)]
    pub date_paiement: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Delivery zone with its pricing (`zones-livraison/`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneLivraison {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub nom: String,
    pub ville: String,
    /// Comma-separated district list, as stored by the backend.
    pub quartiers: String,
    pub tarif_base: String,
    pub tarif_km_supplementaire: String,
    #[serde(default)]
    pub delai_livraison_jours: i64,
    #[serde(default)]
    pub active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_creation: Option<DateTime<Utc>>,
}

/// Outbound notification (`notifications/`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub utilisateur: Option<i64>,
    pub colis: i64,
    pub type_notification: TypeNotification,
    pub destinataire: String,
    pub sujet: String,
    pub message: String,
    #[serde(default)]
    pub statut: NotificationStatut,
    #[serde(default)]
    pub date_envoi: Option<DateTime<Utc>>,
    #[serde(default)]
    pub date_lecture: Option<DateTime<Utc>>,
}

/// Pricing rule (`tarifs/`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tarif {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub poids_min: String,
    pub poids_max: String,
    pub distance_min: String,
    pub distance_max: String,
    pub prix: String,
    pub type_service: TypeService,
    #[serde(default)]
    pub actif: bool,
    pub date_debut: NaiveDate,
    #[serde(default)]
    pub date_fin: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colis_deserializes_from_backend_shape() {
        let json = r#"{
            "id": 42,
            "numero_suivi": "CF-2024-0042",
            "expediteur": 3,
            "destinataire": 9,
            "utilisateur": 1,
            "poids": "2.50",
            "description": "Pièces détachées",
            "valeur_declaree": "15000.00",
            "type_colis": "FRAGILE",
            "statut": "EN_TRANSIT",
            "priorite": "EXPRESS",
            "assurance": true,
            "montant_assurance": "500.00",
            "frais_envoi": "2500.00",
            "date_creation": "2024-03-01T08:30:00Z",
            "date_livraison_prevue": "2024-03-04T17:00:00Z"
        }"#;

        let colis: Colis = serde_json::from_str(json).unwrap();

        assert_eq!(colis.id, Some(42));
        assert_eq!(colis.numero_suivi.as_deref(), Some("CF-2024-0042"));
        assert_eq!(colis.poids.as_deref(), Some("2.50"));
        assert_eq!(colis.type_colis, TypeColis::Fragile);
        assert_eq!(colis.statut, ColisStatut::EnTransit);
        assert_eq!(colis.priorite, Priorite::Express);
        assert!(colis.date_livraison_reelle.is_none());
    }

    #[test]
    fn test_new_colis_serializes_without_server_fields() {
        let colis = Colis {
            id: None,
            numero_suivi: None,
            expediteur: 3,
            destinataire: 9,
            utilisateur: None,
            poids: Some("1.20".to_string()),
            longueur: None,
            largeur: None,
            hauteur: None,
            description: "Documents".to_string(),
            valeur_declaree: None,
            type_colis: TypeColis::Document,
            statut: ColisStatut::default(),
            priorite: Priorite::default(),
            assurance: false,
            montant_assurance: None,
            instructions_speciales: None,
            frais_envoi: None,
            date_creation: None,
            date_modification: None,
            date_livraison_prevue: None,
            date_livraison_reelle: None,
        };

        let json = serde_json::to_value(&colis).unwrap();

        // Server-assigned fields are absent, not null.
        assert!(json.get("id").is_none());
        assert!(json.get("numero_suivi").is_none());
        assert!(json.get("date_creation").is_none());
        assert_eq!(json["statut"], "EN_ATTENTE");
        assert_eq!(json["type_colis"], "DOCUMENT");
    }

    #[test]
    fn test_status_enum_wire_values() {
        assert_eq!(
            serde_json::to_string(&ColisStatut::EnLivraison).unwrap(),
            "\"EN_LIVRAISON\""
        );
        assert_eq!(
            serde_json::to_string(&SuiviStatut::RetourExpediteur).unwrap(),
            "\"RETOUR_EXPEDITEUR\""
        );
        assert_eq!(
            serde_json::to_string(&ModePaiement::MobileMoney).unwrap(),
            "\"MOBILE_MONEY\""
        );
        assert_eq!(
            serde_json::to_string(&VehiculeStatut::HorsService).unwrap(),
            "\"HORS_SERVICE\""
        );
        assert_eq!(
            serde_json::from_str::<TypeNotification>("\"SMS\"").unwrap(),
            TypeNotification::Sms
        );
    }

    #[test]
    fn test_livreur_dates_parse_as_plain_dates() {
        let json = r#"{
            "id": 5,
            "utilisateur": 11,
            "matricule": "LIV-011",
            "permis_conduire": "B-998877",
            "date_validite_permis": "2027-06-30",
            "telephone_pro": "+237699001122",
            "statut": "DISPONIBLE",
            "note_moyenne": "4.50",
            "nombre_livraisons": 128,
            "zone_intervention": "Douala III",
            "date_embauche": "2022-01-15",
            "actif": true
        }"#;

        let livreur: Livreur = serde_json::from_str(json).unwrap();

        assert_eq!(
            livreur.date_embauche,
            NaiveDate::from_ymd_opt(2022, 1, 15).unwrap()
        );
        assert_eq!(livreur.statut, LivreurStatut::Disponible);
    }

    #[test]
    fn test_facture_optional_payment_mode() {
        let json = r#"{
            "id": 8,
            "numero_facture": "FAC-00000008",
            "colis": 42,
            "montant_total": "3500.00",
            "statut": "PARTIELLEMENT_PAYEE",
            "mode_paiement": null
        }"#;

        let facture: Facture = serde_json::from_str(json).unwrap();

        assert_eq!(facture.statut, FactureStatut::PartiellementPayee);
        assert_eq!(facture.mode_paiement, None);
    }

    #[test]
    fn test_utilisateur_password_is_write_only() {
        let json = r#"{"id": 2, "username": "ops", "role": "OPERATEUR", "actif": true}"#;
        let user: Utilisateur = serde_json::from_str(json).unwrap();
        assert_eq!(user.password, None);

        let out = serde_json::to_value(&user).unwrap();
        assert!(out.get("password").is_none());
    }
}
