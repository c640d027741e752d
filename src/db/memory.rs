// src/db/memory.rs
//
// Repositórios em memória para os testes (sem Postgres).
// Imitam as regras do esquema: FK inexistente -> InvalidReference,
// e-mail duplicado -> EmailAlreadyExists, CASCADE / SET NULL nos deletes.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{
        CategoryRepository, CompanyRepository, DashboardRepository, EquipmentRepository, MaintenanceRepository,
        Repositories, TeamRepository, UserRepository, WorkCenterRepository, company_repo::OWNER_ROLE,
    },
    models::{
        auth::{CompanyMembership, NewUser, User, UserSummary},
        category::{CategoryDetail, CreateCategoryPayload, EquipmentCategory, UpdateCategoryPayload},
        company::{Company, CompanyDetail, CompanyMember, CompanyOverview, CreateCompanyPayload, UpdateCompanyPayload},
        dashboard::RequestSample,
        equipment::{CreateEquipmentPayload, Equipment, EquipmentDetail, UpdateEquipmentPayload},
        maintenance::{
            MaintenanceRequest, MaintenanceRequestDetail, NewMaintenanceRequest, RequestStatus,
            UpdateMaintenancePayload,
        },
        scope::CompanyScope,
        team::{CreateTeamPayload, MaintenanceTeam, TeamDetail, TeamMember, TeamMemberDetail, UpdateTeamPayload},
        work_center::{CreateWorkCenterPayload, UpdateWorkCenterPayload, WorkCenter, WorkCenterDetail},
    },
};

#[derive(Debug, Clone)]
struct UserCompany {
    user_id: Uuid,
    company_id: Uuid,
    role: String,
    created_at: DateTime<Utc>,
}

struct State {
    clock: DateTime<Utc>,
    users: Vec<User>,
    user_companies: Vec<UserCompany>,
    companies: Vec<Company>,
    categories: Vec<EquipmentCategory>,
    work_centers: Vec<WorkCenter>,
    equipment: Vec<Equipment>,
    teams: Vec<MaintenanceTeam>,
    members: Vec<TeamMember>,
    requests: Vec<MaintenanceRequest>,
}

impl State {
    // Relógio monotônico: cada escrita ganha um created_at distinto e crescente.
    fn tick(&mut self) -> DateTime<Utc> {
        self.clock += Duration::milliseconds(1);
        self.clock
    }

    fn user(&self, id: Uuid) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    fn user_name(&self, id: Option<Uuid>) -> Option<String> {
        id.and_then(|id| self.user(id)).and_then(|u| u.full_name.clone())
    }

    fn company_name(&self, id: Option<Uuid>) -> Option<String> {
        id.and_then(|id| self.companies.iter().find(|c| c.id == id)).map(|c| c.name.clone())
    }

    fn category_name(&self, id: Option<Uuid>) -> Option<String> {
        id.and_then(|id| self.categories.iter().find(|c| c.id == id)).map(|c| c.name.clone())
    }

    fn work_center_name(&self, id: Option<Uuid>) -> Option<String> {
        id.and_then(|id| self.work_centers.iter().find(|w| w.id == id)).map(|w| w.name.clone())
    }

    fn team_name(&self, id: Option<Uuid>) -> Option<String> {
        id.and_then(|id| self.teams.iter().find(|t| t.id == id)).map(|t| t.name.clone())
    }

    fn equipment_name(&self, id: Option<Uuid>) -> Option<String> {
        id.and_then(|id| self.equipment.iter().find(|e| e.id == id)).map(|e| e.name.clone())
    }

    // Checagens de chave estrangeira
    fn check_company(&self, id: Uuid) -> Result<(), AppError> {
        reference(self.companies.iter().any(|c| c.id == id))
    }

    fn check_user(&self, id: Option<Uuid>) -> Result<(), AppError> {
        match id {
            Some(id) => reference(self.user(id).is_some()),
            None => Ok(()),
        }
    }

    fn check_category(&self, id: Option<Uuid>) -> Result<(), AppError> {
        match id {
            Some(id) => reference(self.categories.iter().any(|c| c.id == id)),
            None => Ok(()),
        }
    }

    fn check_work_center(&self, id: Option<Uuid>) -> Result<(), AppError> {
        match id {
            Some(id) => reference(self.work_centers.iter().any(|w| w.id == id)),
            None => Ok(()),
        }
    }

    fn check_team(&self, id: Option<Uuid>) -> Result<(), AppError> {
        match id {
            Some(id) => reference(self.teams.iter().any(|t| t.id == id)),
            None => Ok(()),
        }
    }

    fn check_equipment(&self, id: Option<Uuid>) -> Result<(), AppError> {
        match id {
            Some(id) => reference(self.equipment.iter().any(|e| e.id == id)),
            None => Ok(()),
        }
    }

    fn category_detail(&self, category: &EquipmentCategory) -> CategoryDetail {
        let responsible = category.responsible_user_id.and_then(|id| self.user(id));
        CategoryDetail {
            category: category.clone(),
            company_name: self.company_name(Some(category.company_id)),
            responsible_user_name: responsible.and_then(|u| u.full_name.clone()),
            responsible_user_email: responsible.map(|u| u.email.clone()),
        }
    }

    fn work_center_detail(&self, work_center: &WorkCenter) -> WorkCenterDetail {
        WorkCenterDetail {
            work_center: work_center.clone(),
            company_name: self.company_name(Some(work_center.company_id)),
        }
    }

    fn equipment_detail(&self, equipment: &Equipment) -> EquipmentDetail {
        EquipmentDetail {
            equipment: equipment.clone(),
            category_name: self.category_name(equipment.category_id),
            company_name: self.company_name(Some(equipment.company_id)),
            work_center_name: self.work_center_name(equipment.work_center_id),
            team_name: self.team_name(equipment.maintenance_team_id),
            technician_name: self.user_name(equipment.technician_user_id),
        }
    }

    fn member_detail(&self, member: &TeamMember) -> TeamMemberDetail {
        let user = self.user(member.user_id);
        TeamMemberDetail {
            member: member.clone(),
            full_name: user.and_then(|u| u.full_name.clone()),
            email: user.map(|u| u.email.clone()).unwrap_or_default(),
        }
    }

    fn team_detail(&self, team: &MaintenanceTeam) -> TeamDetail {
        TeamDetail {
            team: team.clone(),
            company_name: self.company_name(Some(team.company_id)),
            members: self
                .members
                .iter()
                .filter(|m| m.team_id == team.id)
                .map(|m| self.member_detail(m))
                .collect(),
        }
    }

    fn request_detail(&self, request: &MaintenanceRequest) -> MaintenanceRequestDetail {
        let equipment = request.equipment_id.and_then(|id| self.equipment.iter().find(|e| e.id == id));
        MaintenanceRequestDetail {
            request: request.clone(),
            equipment_name: self.equipment_name(request.equipment_id),
            work_center_name: self.work_center_name(request.work_center_id),
            category_name: self
                .category_name(request.category_id)
                .or_else(|| self.category_name(equipment.and_then(|e| e.category_id))),
            company_name: self
                .company_name(request.company_id)
                .or_else(|| self.company_name(equipment.map(|e| e.company_id))),
            team_name: self.team_name(request.team_id),
            requested_by_name: self.user_name(Some(request.requested_by_id)),
            assigned_to_name: self.user_name(request.assigned_to_id),
        }
    }

    fn company_overview(&self, company: &Company) -> CompanyOverview {
        let count = |n: usize| n as i64;
        CompanyOverview {
            company: company.clone(),
            user_count: count(self.user_companies.iter().filter(|uc| uc.company_id == company.id).count()),
            equipment_count: count(self.equipment.iter().filter(|e| e.company_id == company.id).count()),
            team_count: count(self.teams.iter().filter(|t| t.company_id == company.id).count()),
        }
    }

    fn scoped_requests(&self, scope: CompanyScope) -> impl Iterator<Item = &MaintenanceRequest> {
        self.requests.iter().filter(move |r| scope.includes(r.company_id))
    }
}

fn reference(exists: bool) -> Result<(), AppError> {
    if exists { Ok(()) } else { Err(AppError::InvalidReference) }
}

// Mais recentes primeiro, como o ORDER BY created_at DESC dos repositórios reais
fn newest_first<T: Clone>(items: impl Iterator<Item = T>, created_at: impl Fn(&T) -> DateTime<Utc>) -> Vec<T> {
    let mut list: Vec<T> = items.collect();
    list.sort_by_key(|item| std::cmp::Reverse(created_at(item)));
    list
}

pub struct InMemoryStore {
    state: Mutex<State>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self {
            state: Mutex::new(State {
                clock: Utc::now() - Duration::hours(1),
                users: Vec::new(),
                user_companies: Vec::new(),
                companies: Vec::new(),
                categories: Vec::new(),
                work_centers: Vec::new(),
                equipment: Vec::new(),
                teams: Vec::new(),
                members: Vec::new(),
                requests: Vec::new(),
            }),
        }
    }
}

impl InMemoryStore {
    fn lock(&self) -> MutexGuard<'_, State> {
        // Um teste que entrou em pânico não deve envenenar os outros
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    // --- Seeds para os testes ---

    pub fn seed_user(&self, email: &str, full_name: Option<&str>) -> User {
        let mut state = self.lock();
        let now = state.tick();
        let user = User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password_hash: String::new(),
            full_name: full_name.map(str::to_string),
            role: "user".into(),
            created_at: now,
            updated_at: now,
        };
        state.users.push(user.clone());
        user
    }

    pub fn seed_company(&self, name: &str) -> Company {
        let mut state = self.lock();
        let now = state.tick();
        let company = Company {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: None,
            created_at: now,
            updated_at: now,
        };
        state.companies.push(company.clone());
        company
    }

    /// Insere um pedido cru (ex.: com `created_at` no passado).
    pub fn insert_request(&self, request: MaintenanceRequest) {
        self.lock().requests.push(request);
    }

    pub fn request_count(&self) -> usize {
        self.lock().requests.len()
    }

    pub fn user_count(&self) -> usize {
        self.lock().users.len()
    }

    pub fn member_count(&self, team_id: Uuid) -> usize {
        self.lock().members.iter().filter(|m| m.team_id == team_id).count()
    }
}

impl Repositories {
    pub fn in_memory() -> (Self, Arc<InMemoryStore>) {
        let store = Arc::new(InMemoryStore::default());
        let repos = Self {
            users: store.clone(),
            companies: store.clone(),
            categories: store.clone(),
            work_centers: store.clone(),
            equipment: store.clone(),
            teams: store.clone(),
            maintenance: store.clone(),
            dashboard: store.clone(),
        };
        (repos, store)
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self.lock().users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        Ok(self.lock().user(id).cloned())
    }

    async fn create(&self, user: NewUser) -> Result<User, AppError> {
        let mut state = self.lock();
        if state.users.iter().any(|u| u.email == user.email) {
            return Err(AppError::EmailAlreadyExists);
        }
        let now = state.tick();
        let created = User {
            id: Uuid::new_v4(),
            email: user.email,
            password_hash: user.password_hash,
            full_name: user.full_name,
            role: "user".into(),
            created_at: now,
            updated_at: now,
        };
        state.users.push(created.clone());
        Ok(created)
    }

    async fn memberships(&self, user_id: Uuid) -> Result<Vec<CompanyMembership>, AppError> {
        let state = self.lock();
        Ok(state
            .user_companies
            .iter()
            .filter(|uc| uc.user_id == user_id)
            .filter_map(|uc| {
                state.companies.iter().find(|c| c.id == uc.company_id).map(|c| CompanyMembership {
                    company_id: c.id,
                    company_name: c.name.clone(),
                    role: uc.role.clone(),
                    joined_at: uc.created_at,
                })
            })
            .collect())
    }

    async fn list_summaries(&self) -> Result<Vec<UserSummary>, AppError> {
        Ok(self.lock().users.iter().map(UserSummary::from).collect())
    }
}

#[async_trait]
impl CompanyRepository for InMemoryStore {
    async fn list(&self, scope: CompanyScope) -> Result<Vec<CompanyOverview>, AppError> {
        let state = self.lock();
        let companies = state.companies.iter().filter(|c| scope.includes(Some(c.id)));
        Ok(newest_first(companies.map(|c| state.company_overview(c)), |c| c.company.created_at))
    }

    async fn find(&self, id: Uuid) -> Result<Option<CompanyDetail>, AppError> {
        let state = self.lock();
        let Some(company) = state.companies.iter().find(|c| c.id == id) else {
            return Ok(None);
        };
        let members = state
            .user_companies
            .iter()
            .filter(|uc| uc.company_id == id)
            .filter_map(|uc| {
                state.user(uc.user_id).map(|u| CompanyMember {
                    user_id: u.id,
                    email: u.email.clone(),
                    full_name: u.full_name.clone(),
                    role: uc.role.clone(),
                    joined_at: uc.created_at,
                })
            })
            .collect();
        Ok(Some(CompanyDetail { company: company.clone(), members }))
    }

    async fn create_with_owner(&self, payload: CreateCompanyPayload, owner_id: Uuid) -> Result<Company, AppError> {
        let mut state = self.lock();
        // Sem dono válido nada é gravado (equivalente ao rollback)
        state.check_user(Some(owner_id))?;
        let now = state.tick();
        let company = Company {
            id: Uuid::new_v4(),
            name: payload.name,
            description: payload.description,
            created_at: now,
            updated_at: now,
        };
        state.companies.push(company.clone());
        state.user_companies.push(UserCompany {
            user_id: owner_id,
            company_id: company.id,
            role: OWNER_ROLE.to_string(),
            created_at: now,
        });
        Ok(company)
    }

    async fn update(&self, id: Uuid, payload: UpdateCompanyPayload) -> Result<Option<Company>, AppError> {
        let mut state = self.lock();
        let now = state.tick();
        let Some(company) = state.companies.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        if let Some(name) = payload.name {
            company.name = name;
        }
        if let Some(description) = payload.description {
            company.description = description;
        }
        company.updated_at = now;
        Ok(Some(company.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let mut state = self.lock();
        let before = state.companies.len();
        state.companies.retain(|c| c.id != id);
        if state.companies.len() == before {
            return Ok(false);
        }
        // ON DELETE CASCADE
        state.user_companies.retain(|uc| uc.company_id != id);
        state.categories.retain(|c| c.company_id != id);
        state.work_centers.retain(|w| w.company_id != id);
        state.equipment.retain(|e| e.company_id != id);
        state.requests.retain(|r| r.company_id != Some(id));
        let team_ids: Vec<Uuid> = state.teams.iter().filter(|t| t.company_id == id).map(|t| t.id).collect();
        state.teams.retain(|t| t.company_id != id);
        state.members.retain(|m| !team_ids.contains(&m.team_id));
        Ok(true)
    }

    async fn list_plain(&self) -> Result<Vec<Company>, AppError> {
        let mut companies = self.lock().companies.clone();
        companies.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(companies)
    }
}

#[async_trait]
impl CategoryRepository for InMemoryStore {
    async fn list(&self, scope: CompanyScope) -> Result<Vec<CategoryDetail>, AppError> {
        let state = self.lock();
        let categories = state.categories.iter().filter(|c| scope.includes(Some(c.company_id)));
        Ok(newest_first(categories.map(|c| state.category_detail(c)), |c| c.category.created_at))
    }

    async fn find(&self, id: Uuid) -> Result<Option<CategoryDetail>, AppError> {
        let state = self.lock();
        Ok(state.categories.iter().find(|c| c.id == id).map(|c| state.category_detail(c)))
    }

    async fn create(&self, payload: CreateCategoryPayload) -> Result<EquipmentCategory, AppError> {
        let mut state = self.lock();
        state.check_company(payload.company_id)?;
        state.check_user(payload.responsible_user_id)?;
        let now = state.tick();
        let category = EquipmentCategory {
            id: Uuid::new_v4(),
            name: payload.name,
            description: payload.description,
            company_id: payload.company_id,
            responsible_user_id: payload.responsible_user_id,
            created_at: now,
            updated_at: now,
        };
        state.categories.push(category.clone());
        Ok(category)
    }

    async fn update(&self, id: Uuid, payload: UpdateCategoryPayload) -> Result<Option<EquipmentCategory>, AppError> {
        let mut state = self.lock();
        if let Some(responsible) = payload.responsible_user_id {
            state.check_user(responsible)?;
        }
        let now = state.tick();
        let Some(category) = state.categories.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        if let Some(name) = payload.name {
            category.name = name;
        }
        if let Some(description) = payload.description {
            category.description = description;
        }
        if let Some(responsible) = payload.responsible_user_id {
            category.responsible_user_id = responsible;
        }
        category.updated_at = now;
        Ok(Some(category.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let mut state = self.lock();
        let before = state.categories.len();
        state.categories.retain(|c| c.id != id);
        if state.categories.len() == before {
            return Ok(false);
        }
        // ON DELETE SET NULL
        for equipment in state.equipment.iter_mut().filter(|e| e.category_id == Some(id)) {
            equipment.category_id = None;
        }
        for request in state.requests.iter_mut().filter(|r| r.category_id == Some(id)) {
            request.category_id = None;
        }
        Ok(true)
    }

    async fn list_plain(&self, scope: CompanyScope) -> Result<Vec<EquipmentCategory>, AppError> {
        let mut categories: Vec<EquipmentCategory> = self
            .lock()
            .categories
            .iter()
            .filter(|c| scope.includes(Some(c.company_id)))
            .cloned()
            .collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }
}

#[async_trait]
impl WorkCenterRepository for InMemoryStore {
    async fn list(&self, scope: CompanyScope) -> Result<Vec<WorkCenterDetail>, AppError> {
        let state = self.lock();
        let work_centers = state.work_centers.iter().filter(|w| scope.includes(Some(w.company_id)));
        Ok(newest_first(work_centers.map(|w| state.work_center_detail(w)), |w| w.work_center.created_at))
    }

    async fn find(&self, id: Uuid) -> Result<Option<WorkCenterDetail>, AppError> {
        let state = self.lock();
        Ok(state.work_centers.iter().find(|w| w.id == id).map(|w| state.work_center_detail(w)))
    }

    async fn create(&self, payload: CreateWorkCenterPayload) -> Result<WorkCenter, AppError> {
        let mut state = self.lock();
        state.check_company(payload.company_id)?;
        let now = state.tick();
        let work_center = WorkCenter {
            id: Uuid::new_v4(),
            name: payload.name,
            code: payload.code,
            tag: payload.tag,
            alternative_work_centers: payload.alternative_work_centers,
            cost_per_hour: payload.cost_per_hour,
            capacity: payload.capacity,
            time_efficiency: payload.time_efficiency,
            oee_target: payload.oee_target,
            location: payload.location,
            description: payload.description,
            company_id: payload.company_id,
            created_at: now,
            updated_at: now,
        };
        state.work_centers.push(work_center.clone());
        Ok(work_center)
    }

    async fn update(&self, id: Uuid, payload: UpdateWorkCenterPayload) -> Result<Option<WorkCenter>, AppError> {
        let mut state = self.lock();
        let now = state.tick();
        let Some(wc) = state.work_centers.iter_mut().find(|w| w.id == id) else {
            return Ok(None);
        };
        if let Some(name) = payload.name {
            wc.name = name;
        }
        if let Some(v) = payload.code {
            wc.code = v;
        }
        if let Some(v) = payload.tag {
            wc.tag = v;
        }
        if let Some(v) = payload.alternative_work_centers {
            wc.alternative_work_centers = v;
        }
        if let Some(v) = payload.cost_per_hour {
            wc.cost_per_hour = v;
        }
        if let Some(v) = payload.capacity {
            wc.capacity = v;
        }
        if let Some(v) = payload.time_efficiency {
            wc.time_efficiency = v;
        }
        if let Some(v) = payload.oee_target {
            wc.oee_target = v;
        }
        if let Some(v) = payload.location {
            wc.location = v;
        }
        if let Some(v) = payload.description {
            wc.description = v;
        }
        wc.updated_at = now;
        Ok(Some(wc.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let mut state = self.lock();
        let before = state.work_centers.len();
        state.work_centers.retain(|w| w.id != id);
        if state.work_centers.len() == before {
            return Ok(false);
        }
        for equipment in state.equipment.iter_mut().filter(|e| e.work_center_id == Some(id)) {
            equipment.work_center_id = None;
        }
        for request in state.requests.iter_mut().filter(|r| r.work_center_id == Some(id)) {
            request.work_center_id = None;
        }
        Ok(true)
    }

    async fn list_plain(&self, scope: CompanyScope) -> Result<Vec<WorkCenter>, AppError> {
        let mut work_centers: Vec<WorkCenter> = self
            .lock()
            .work_centers
            .iter()
            .filter(|w| scope.includes(Some(w.company_id)))
            .cloned()
            .collect();
        work_centers.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(work_centers)
    }
}

#[async_trait]
impl EquipmentRepository for InMemoryStore {
    async fn list(&self, scope: CompanyScope) -> Result<Vec<EquipmentDetail>, AppError> {
        let state = self.lock();
        let equipment = state.equipment.iter().filter(|e| scope.includes(Some(e.company_id)));
        Ok(newest_first(equipment.map(|e| state.equipment_detail(e)), |e| e.equipment.created_at))
    }

    async fn find(&self, id: Uuid) -> Result<Option<EquipmentDetail>, AppError> {
        let state = self.lock();
        Ok(state.equipment.iter().find(|e| e.id == id).map(|e| state.equipment_detail(e)))
    }

    async fn create(&self, payload: CreateEquipmentPayload) -> Result<Equipment, AppError> {
        let mut state = self.lock();
        state.check_company(payload.company_id)?;
        state.check_category(payload.category_id)?;
        state.check_work_center(payload.work_center_id)?;
        state.check_team(payload.maintenance_team_id)?;
        state.check_user(payload.used_by_user_id)?;
        state.check_user(payload.technician_user_id)?;
        let now = state.tick();
        let equipment = Equipment {
            id: Uuid::new_v4(),
            name: payload.name,
            description: payload.description,
            serial_number: payload.serial_number,
            model: payload.model,
            manufacturer: payload.manufacturer,
            purchase_date: payload.purchase_date,
            warranty_expiry: payload.warranty_expiry,
            status: payload.status,
            health_percentage: payload.health_percentage.unwrap_or(100),
            company_id: payload.company_id,
            category_id: payload.category_id,
            work_center_id: payload.work_center_id,
            department: payload.department,
            location: payload.location,
            used_by_user_id: payload.used_by_user_id,
            technician_user_id: payload.technician_user_id,
            maintenance_team_id: payload.maintenance_team_id,
            assigned_date: payload.assigned_date,
            scrap_date: payload.scrap_date,
            created_at: now,
            updated_at: now,
        };
        state.equipment.push(equipment.clone());
        Ok(equipment)
    }

    async fn update(&self, id: Uuid, payload: UpdateEquipmentPayload) -> Result<Option<Equipment>, AppError> {
        let mut state = self.lock();
        if let Some(category) = payload.category_id {
            state.check_category(category)?;
        }
        if let Some(work_center) = payload.work_center_id {
            state.check_work_center(work_center)?;
        }
        if let Some(team) = payload.maintenance_team_id {
            state.check_team(team)?;
        }
        let now = state.tick();
        let Some(e) = state.equipment.iter_mut().find(|e| e.id == id) else {
            return Ok(None);
        };
        if let Some(name) = payload.name {
            e.name = name;
        }
        if let Some(v) = payload.description {
            e.description = v;
        }
        if let Some(v) = payload.serial_number {
            e.serial_number = v;
        }
        if let Some(v) = payload.model {
            e.model = v;
        }
        if let Some(v) = payload.manufacturer {
            e.manufacturer = v;
        }
        if let Some(v) = payload.purchase_date {
            e.purchase_date = v;
        }
        if let Some(v) = payload.warranty_expiry {
            e.warranty_expiry = v;
        }
        if let Some(v) = payload.status {
            e.status = v;
        }
        if let Some(v) = payload.health_percentage {
            e.health_percentage = v;
        }
        if let Some(v) = payload.category_id {
            e.category_id = v;
        }
        if let Some(v) = payload.work_center_id {
            e.work_center_id = v;
        }
        if let Some(v) = payload.department {
            e.department = v;
        }
        if let Some(v) = payload.location {
            e.location = v;
        }
        if let Some(v) = payload.used_by_user_id {
            e.used_by_user_id = v;
        }
        if let Some(v) = payload.technician_user_id {
            e.technician_user_id = v;
        }
        if let Some(v) = payload.maintenance_team_id {
            e.maintenance_team_id = v;
        }
        if let Some(v) = payload.assigned_date {
            e.assigned_date = v;
        }
        if let Some(v) = payload.scrap_date {
            e.scrap_date = v;
        }
        e.updated_at = now;
        Ok(Some(e.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let mut state = self.lock();
        let before = state.equipment.len();
        state.equipment.retain(|e| e.id != id);
        if state.equipment.len() == before {
            return Ok(false);
        }
        for request in state.requests.iter_mut().filter(|r| r.equipment_id == Some(id)) {
            request.equipment_id = None;
        }
        Ok(true)
    }
}

#[async_trait]
impl TeamRepository for InMemoryStore {
    async fn list(&self, scope: CompanyScope) -> Result<Vec<TeamDetail>, AppError> {
        let state = self.lock();
        let teams = state.teams.iter().filter(|t| scope.includes(Some(t.company_id)));
        Ok(newest_first(teams.map(|t| state.team_detail(t)), |t| t.team.created_at))
    }

    async fn find(&self, id: Uuid) -> Result<Option<TeamDetail>, AppError> {
        let state = self.lock();
        Ok(state.teams.iter().find(|t| t.id == id).map(|t| state.team_detail(t)))
    }

    async fn create(&self, payload: CreateTeamPayload) -> Result<MaintenanceTeam, AppError> {
        let mut state = self.lock();
        state.check_company(payload.company_id)?;
        let now = state.tick();
        let team = MaintenanceTeam {
            id: Uuid::new_v4(),
            name: payload.name,
            description: payload.description,
            company_id: payload.company_id,
            created_at: now,
            updated_at: now,
        };
        state.teams.push(team.clone());
        Ok(team)
    }

    async fn update(&self, id: Uuid, payload: UpdateTeamPayload) -> Result<Option<MaintenanceTeam>, AppError> {
        let mut state = self.lock();
        let now = state.tick();
        let Some(team) = state.teams.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };
        if let Some(name) = payload.name {
            team.name = name;
        }
        if let Some(description) = payload.description {
            team.description = description;
        }
        team.updated_at = now;
        Ok(Some(team.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let mut state = self.lock();
        let before = state.teams.len();
        state.teams.retain(|t| t.id != id);
        if state.teams.len() == before {
            return Ok(false);
        }
        state.members.retain(|m| m.team_id != id);
        for equipment in state.equipment.iter_mut().filter(|e| e.maintenance_team_id == Some(id)) {
            equipment.maintenance_team_id = None;
        }
        for request in state.requests.iter_mut().filter(|r| r.team_id == Some(id)) {
            request.team_id = None;
        }
        Ok(true)
    }

    async fn add_member(&self, team_id: Uuid, user_id: Uuid, role: String) -> Result<TeamMemberDetail, AppError> {
        let mut state = self.lock();
        state.check_team(Some(team_id))?;
        state.check_user(Some(user_id))?;
        let now = state.tick();
        let member = TeamMember {
            id: Uuid::new_v4(),
            team_id,
            user_id,
            role,
            created_at: now,
            updated_at: now,
        };
        state.members.push(member.clone());
        Ok(state.member_detail(&member))
    }

    async fn remove_member(&self, team_id: Uuid, member_id: Uuid) -> Result<bool, AppError> {
        let mut state = self.lock();
        let before = state.members.len();
        state.members.retain(|m| !(m.id == member_id && m.team_id == team_id));
        Ok(state.members.len() < before)
    }

    async fn list_plain(&self, scope: CompanyScope) -> Result<Vec<MaintenanceTeam>, AppError> {
        let mut teams: Vec<MaintenanceTeam> = self
            .lock()
            .teams
            .iter()
            .filter(|t| scope.includes(Some(t.company_id)))
            .cloned()
            .collect();
        teams.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(teams)
    }
}

#[async_trait]
impl MaintenanceRepository for InMemoryStore {
    async fn list(&self, scope: CompanyScope) -> Result<Vec<MaintenanceRequestDetail>, AppError> {
        let state = self.lock();
        let requests = state.scoped_requests(scope).map(|r| state.request_detail(r));
        Ok(newest_first(requests, |r| r.request.created_at))
    }

    async fn find(&self, id: Uuid) -> Result<Option<MaintenanceRequestDetail>, AppError> {
        let state = self.lock();
        Ok(state.requests.iter().find(|r| r.id == id).map(|r| state.request_detail(r)))
    }

    async fn create(&self, request: NewMaintenanceRequest) -> Result<MaintenanceRequest, AppError> {
        let mut state = self.lock();
        state.check_user(Some(request.requested_by_id))?;
        state.check_user(request.assigned_to_id)?;
        state.check_equipment(request.equipment_id)?;
        state.check_work_center(request.work_center_id)?;
        state.check_category(request.category_id)?;
        state.check_team(request.team_id)?;
        if let Some(company_id) = request.company_id {
            state.check_company(company_id)?;
        }
        let now = state.tick();
        let created = MaintenanceRequest {
            id: Uuid::new_v4(),
            title: request.title,
            description: request.description,
            priority: request.priority,
            status: request.status,
            request_type: request.request_type,
            scheduled_date: request.scheduled_date,
            completed_date: request.completed_date,
            equipment_id: request.equipment_id,
            work_center_id: request.work_center_id,
            company_id: request.company_id,
            category_id: request.category_id,
            requested_by_id: request.requested_by_id,
            assigned_to_id: request.assigned_to_id,
            team_id: request.team_id,
            created_at: now,
            updated_at: now,
        };
        state.requests.push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: Uuid, payload: UpdateMaintenancePayload) -> Result<Option<MaintenanceRequest>, AppError> {
        let mut state = self.lock();
        if let Some(assignee) = payload.assigned_to_id {
            state.check_user(assignee)?;
        }
        if let Some(equipment) = payload.equipment_id {
            state.check_equipment(equipment)?;
        }
        if let Some(team) = payload.team_id {
            state.check_team(team)?;
        }
        let now = state.tick();
        let Some(r) = state.requests.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };
        if let Some(title) = payload.title {
            r.title = title;
        }
        if let Some(v) = payload.description {
            r.description = v;
        }
        if let Some(v) = payload.priority {
            r.priority = v;
        }
        if let Some(v) = payload.status {
            r.status = v;
        }
        if let Some(v) = payload.request_type {
            r.request_type = v;
        }
        if let Some(v) = payload.scheduled_date {
            r.scheduled_date = v;
        }
        if let Some(v) = payload.completed_date {
            r.completed_date = v;
        }
        if let Some(v) = payload.equipment_id {
            r.equipment_id = v;
        }
        if let Some(v) = payload.work_center_id {
            r.work_center_id = v;
        }
        if let Some(v) = payload.category_id {
            r.category_id = v;
        }
        if let Some(v) = payload.assigned_to_id {
            r.assigned_to_id = v;
        }
        if let Some(v) = payload.team_id {
            r.team_id = v;
        }
        r.updated_at = now;
        Ok(Some(r.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let mut state = self.lock();
        let before = state.requests.len();
        state.requests.retain(|r| r.id != id);
        Ok(state.requests.len() < before)
    }

    async fn recent(&self, scope: CompanyScope, limit: i64) -> Result<Vec<MaintenanceRequestDetail>, AppError> {
        let state = self.lock();
        let requests = state.scoped_requests(scope).map(|r| state.request_detail(r));
        let mut list = newest_first(requests, |r| r.request.created_at);
        list.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(list)
    }
}

#[async_trait]
impl DashboardRepository for InMemoryStore {
    async fn count_equipment(&self, scope: CompanyScope) -> Result<i64, AppError> {
        let state = self.lock();
        Ok(state.equipment.iter().filter(|e| scope.includes(Some(e.company_id))).count() as i64)
    }

    async fn count_critical_equipment(&self, scope: CompanyScope, threshold: i32) -> Result<i64, AppError> {
        let state = self.lock();
        Ok(state
            .equipment
            .iter()
            .filter(|e| scope.includes(Some(e.company_id)) && e.health_percentage < threshold)
            .count() as i64)
    }

    async fn count_requests(&self, scope: CompanyScope, status: Option<RequestStatus>) -> Result<i64, AppError> {
        let state = self.lock();
        Ok(state
            .scoped_requests(scope)
            .filter(|r| status.is_none_or(|s| r.status == s))
            .count() as i64)
    }

    async fn count_overdue(&self, scope: CompanyScope, now: DateTime<Utc>) -> Result<i64, AppError> {
        let state = self.lock();
        Ok(state.scoped_requests(scope).filter(|r| r.is_overdue(now)).count() as i64)
    }

    async fn count_teams(&self, scope: CompanyScope) -> Result<i64, AppError> {
        let state = self.lock();
        Ok(state.teams.iter().filter(|t| scope.includes(Some(t.company_id))).count() as i64)
    }

    async fn count_technicians(&self, scope: CompanyScope) -> Result<i64, AppError> {
        let state = self.lock();
        Ok(state
            .members
            .iter()
            .filter(|m| {
                state
                    .teams
                    .iter()
                    .any(|t| t.id == m.team_id && scope.includes(Some(t.company_id)))
            })
            .count() as i64)
    }

    async fn request_samples(&self, scope: CompanyScope, since: DateTime<Utc>) -> Result<Vec<RequestSample>, AppError> {
        let state = self.lock();
        let mut samples: Vec<RequestSample> = state
            .scoped_requests(scope)
            .filter(|r| r.created_at >= since)
            .map(|r| RequestSample {
                status: r.status,
                request_type: r.request_type,
                created_at: r.created_at,
            })
            .collect();
        samples.sort_by_key(|s| s.created_at);
        Ok(samples)
    }
}
