use sea_orm_migration::prelude::*;

use crate::m20250101_000000_members::Members;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum MembershipDetails {
    Table,
    Id,
    MembershipDate,
    MembershipTime,
    MemberId,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MembershipDetails::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MembershipDetails::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(MembershipDetails::MembershipDate)
                            .date()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MembershipDetails::MembershipTime)
                            .string_len(10)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MembershipDetails::MemberId)
                            .integer()
                            .not_null()
                            .unique_key(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-membership_details-member_id")
                            .from(MembershipDetails::Table, MembershipDetails::MemberId)
                            .to(Members::Table, Members::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MembershipDetails::Table).to_owned())
            .await
    }
}
